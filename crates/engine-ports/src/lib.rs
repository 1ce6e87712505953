//! Trait boundaries the Host depends on but does not implement. Adapters
//! in `nightfall-engine-adapters` provide the production implementations;
//! `testing` feature gates mockall doubles.

pub mod error;
pub mod inbound;
pub mod outbound;

pub use error::PortError;
pub use inbound::HandlerContext;
pub use outbound::{
    AudioDispatchPort, ClockPort, FixedClockPort, FixedRandomPort, IdentityPort, IdentitySummary,
    PersistencePort, RandomPort, TransportPort,
};
