//! Unified error type for the domain layer.
//!
//! Mirrors the rest of the workspace: a single `thiserror`-derived enum per
//! crate boundary rather than `String`/`anyhow` leaking out of pure logic.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown role id: {0}")]
    UnknownRole(String),

    #[error("unknown schema id: {0:?}")]
    UnknownSchema(crate::schema::SchemaId),

    #[error("invalid role ids: {0:?}")]
    InvalidRoleIds(Vec<String>),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }
}
