//! Concrete port implementations for the night-one werewolf Host.
//!
//! Every `nightfall-engine-ports` trait has exactly one production adapter
//! here: an in-memory/JSON-file `PersistencePort`, a `chrono`-backed
//! `ClockPort`, a `rand`-backed `RandomPort`, a logging `AudioDispatchPort`
//! stub (real playback is an external collaborator), an in-memory
//! `IdentityPort`, and an axum WebSocket `TransportPort`.

pub mod audio;
pub mod clock;
pub mod config;
pub mod identity;
pub mod logging;
pub mod persistence;
pub mod random;
pub mod transport;

pub use audio::LoggingAudioDispatchPort;
pub use clock::SystemClockPort;
pub use config::AppConfig;
pub use identity::InMemoryIdentityPort;
pub use persistence::{FileSnapshotPersistence, InMemoryPersistence};
pub use random::ThreadRandomPort;
pub use transport::websocket::{websocket_router, WebSocketTransport};
