use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("not connected to a room")]
    NotConnected,

    #[error("transport failure: {0}")]
    Transport(String),
}
