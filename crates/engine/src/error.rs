use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] nightfall_domain::DomainError),

    #[error("port failure: {0}")]
    Port(#[from] nightfall_engine_ports::PortError),

    #[error("intent rejected: {0:?}")]
    Rejected(nightfall_domain::RejectReason),
}
