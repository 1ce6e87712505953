//! Outbound ports - interfaces the Host application requires.

mod audio_port;
mod clock_port;
mod identity_port;
mod persistence_port;
mod random_port;
mod transport_port;

pub use audio_port::AudioDispatchPort;
pub use clock_port::{ClockPort, FixedClockPort};
pub use identity_port::{IdentityPort, IdentitySummary};
pub use persistence_port::PersistencePort;
pub use random_port::{FixedRandomPort, RandomPort};
pub use transport_port::TransportPort;

#[cfg(any(test, feature = "testing"))]
pub use audio_port::MockAudioDispatchPort;
#[cfg(any(test, feature = "testing"))]
pub use identity_port::MockIdentityPort;
#[cfg(any(test, feature = "testing"))]
pub use persistence_port::MockPersistencePort;
#[cfg(any(test, feature = "testing"))]
pub use random_port::MockRandomPort;
#[cfg(any(test, feature = "testing"))]
pub use transport_port::MockTransportPort;
