//! Identity adapter: display name / avatar lookup. The identity provider
//! itself is an external collaborator; this adapter is a bare in-memory
//! directory a front door (e.g. an auth callback) populates via
//! `register`, standing in for that collaborator in a self-contained
//! deployment.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use nightfall_domain::Uid;
use nightfall_engine_ports::{IdentityPort, IdentitySummary, PortError};

#[derive(Default)]
pub struct InMemoryIdentityPort {
    directory: RwLock<HashMap<Uid, IdentitySummary>>,
}

impl InMemoryIdentityPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, uid: Uid, summary: IdentitySummary) {
        self.directory.write().expect("identity directory lock poisoned").insert(uid, summary);
    }
}

#[async_trait]
impl IdentityPort for InMemoryIdentityPort {
    async fn lookup(&self, uid: &Uid) -> Result<IdentitySummary, PortError> {
        Ok(self
            .directory
            .read()
            .expect("identity directory lock poisoned")
            .get(uid)
            .cloned()
            .unwrap_or(IdentitySummary { display_name: None, avatar_url: None }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unregistered_uid_resolves_to_empty_summary() {
        let port = InMemoryIdentityPort::new();
        let summary = port.lookup(&"unknown".to_string()).await.unwrap();
        assert!(summary.display_name.is_none());
    }

    #[tokio::test]
    async fn registered_uid_round_trips() {
        let port = InMemoryIdentityPort::new();
        port.register(
            "u0".into(),
            IdentitySummary { display_name: Some("Ada".into()), avatar_url: None },
        );
        let summary = port.lookup(&"u0".to_string()).await.unwrap();
        assert_eq!(summary.display_name.as_deref(), Some("Ada"));
    }
}
