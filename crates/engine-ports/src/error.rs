//! Error type shared by outbound port implementations (not domain errors --
//! those stay in `nightfall-domain`; this is I/O failure reported back to
//! the Host).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("room not found: {0}")]
    RoomNotFound(String),

    #[error("room code space exhausted")]
    RoomCodeSpaceExhausted,

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("identity lookup failed: {0}")]
    Identity(String),
}
