//! Identity port: display name / avatar lookup for seated players. Auth
//! and the identity provider itself are external collaborators -- this
//! port is the whole surface the engine sees of them.

use async_trait::async_trait;

use nightfall_domain::Uid;

use crate::error::PortError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySummary {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait IdentityPort: Send + Sync {
    async fn lookup(&self, uid: &Uid) -> Result<IdentitySummary, PortError>;
}
