//! Outbound contract for the client facade: how the player side
//! talks to a room over whatever transport is actually wired up. Mirrors
//! `nightfall-engine-ports::TransportPort`, but pull-based -- a connection
//! hands back a channel of `ConnectionEvent`s rather than being pushed to,
//! since the facade, not the transport, owns when it is ready to process
//! the next one.

mod error;
mod event;
mod port;

pub use error::ConnectionError;
pub use event::{ConnectionEvent, ConnectionStatus};
pub use port::ServerConnectionPort;

#[cfg(any(test, feature = "testing"))]
pub use port::MockServerConnectionPort;
