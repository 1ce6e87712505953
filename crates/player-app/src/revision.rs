//! Pure tracking logic for revisions and private-inbox binding, kept free
//! of the connection/async plumbing in `facade.rs` so it can be unit
//! tested without a runtime.

use nightfall_domain::Revision;

/// A broadcast older than the last one applied is dropped, never
/// regressing `lastObserved`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RevisionTracker {
    last_observed: Revision,
}

impl RevisionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_observed(&self) -> Revision {
        self.last_observed
    }

    /// Returns whether the caller should act on `revision` -- `false`
    /// means it is stale and must be dropped silently.
    pub fn observe(&mut self, revision: Revision) -> bool {
        if revision < self.last_observed {
            return false;
        }
        self.last_observed = revision;
        true
    }
}

/// Tracks the one outstanding `REQUEST_SNAPSHOT` id so a response older
/// than the client's latest request is discarded. A `FORCE_SYNC`
/// reply carries no request id and is always accepted.
#[derive(Debug, Default, Clone)]
pub struct SnapshotInbox {
    latest_request_id: Option<String>,
}

impl SnapshotInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_request(&mut self, request_id: String) {
        self.latest_request_id = Some(request_id);
    }

    pub fn accepts(&self, request_id: &Option<String>) -> bool {
        match request_id {
            None => true,
            Some(id) => self.latest_request_id.as_deref() == Some(id.as_str()),
        }
    }
}
