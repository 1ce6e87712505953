//! `ClientFacade`: owns one room connection, applies the revision/filter
//! rules, and drives the reconnect/resync sequence.

use std::sync::{Arc, Mutex};

use nightfall_domain::{PrivatePayload, Revision, RoomCode, Uid};
use nightfall_player_ports::{ConnectionError, ConnectionEvent, ConnectionStatus, ServerConnectionPort};
use nightfall_protocol::Intent;
use tokio::sync::mpsc;

use crate::revision::{RevisionTracker, SnapshotInbox};

/// What the facade hands up to the UI layer, already filtered and
/// revision-gated.
#[derive(Debug, Clone, PartialEq)]
pub enum FacadeEvent {
    PublicState {
        revision: Revision,
        state: nightfall_domain::BroadcastGameState,
    },
    PrivateEffect {
        revision: Revision,
        payload: PrivatePayload,
    },
    ConnectionStatus(ConnectionStatus),
}

pub struct ClientFacade {
    port: Arc<dyn ServerConnectionPort>,
    room_code: RoomCode,
    my_uid: Uid,
    is_host: bool,
    tracker: Mutex<RevisionTracker>,
    snapshot_inbox: Mutex<SnapshotInbox>,
    status: Mutex<ConnectionStatus>,
}

impl ClientFacade {
    pub fn new(port: Arc<dyn ServerConnectionPort>, room_code: RoomCode, my_uid: Uid, is_host: bool) -> Arc<Self> {
        Arc::new(Self {
            port,
            room_code,
            my_uid,
            is_host,
            tracker: Mutex::new(RevisionTracker::new()),
            snapshot_inbox: Mutex::new(SnapshotInbox::new()),
            status: Mutex::new(ConnectionStatus::Disconnected),
        })
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        *self.status.lock().expect("status mutex poisoned")
    }

    pub fn last_observed_revision(&self) -> Revision {
        self.tracker.lock().expect("tracker mutex poisoned").last_observed()
    }

    /// Opens the room connection and returns a channel of filtered
    /// `FacadeEvent`s. A background task keeps applying the filter rules
    /// and, if the underlying connection drops, redials it and drives the
    /// disconnected -> syncing -> live resync sequence -- the port
    /// only has to signal a drop by closing its channel; reconnection is
    /// the facade's job, not the transport's.
    pub async fn connect(self: &Arc<Self>) -> Result<mpsc::UnboundedReceiver<FacadeEvent>, ConnectionError> {
        let raw_events = self.port.connect(self.room_code, self.my_uid.clone(), self.is_host).await?;

        let (tx, rx) = mpsc::unbounded_channel();
        let this = Arc::clone(self);
        this.begin_syncing(&tx).await;
        tokio::spawn(async move {
            this.drive(raw_events, tx).await;
        });

        Ok(rx)
    }

    /// Pumps one connection's events until it closes, then tries to
    /// re-establish it and resume. Gives up (ending the task) only when a
    /// fresh `connect` call itself fails -- a caller-driven retry policy
    /// for that case is out of scope here.
    async fn drive(
        self: Arc<Self>,
        mut raw_events: mpsc::UnboundedReceiver<ConnectionEvent>,
        tx: mpsc::UnboundedSender<FacadeEvent>,
    ) {
        loop {
            while let Some(event) = raw_events.recv().await {
                let Some(facade_event) = self.apply(event) else {
                    continue;
                };

                if matches!(facade_event, FacadeEvent::PublicState { .. } | FacadeEvent::PrivateEffect { .. }) {
                    self.maybe_resume_live(facade_event.revision());
                }

                if tx.send(facade_event).is_err() {
                    return;
                }
            }

            *self.status.lock().expect("status mutex poisoned") = ConnectionStatus::Disconnected;
            if tx.send(FacadeEvent::ConnectionStatus(ConnectionStatus::Disconnected)).is_err() {
                return;
            }

            match self.port.connect(self.room_code, self.my_uid.clone(), self.is_host).await {
                Ok(new_events) => {
                    raw_events = new_events;
                    self.begin_syncing(&tx).await;
                }
                Err(error) => {
                    tracing::warn!(%error, room_code = %self.room_code, "giving up reconnecting");
                    return;
                }
            }
        }
    }

    /// Bumps to `syncing` and issues `REQUEST_SNAPSHOT`; `live` resumes
    /// once an accepted broadcast or snapshot arrives.
    async fn begin_syncing(&self, tx: &mpsc::UnboundedSender<FacadeEvent>) {
        *self.status.lock().expect("status mutex poisoned") = ConnectionStatus::Syncing;
        let _ = tx.send(FacadeEvent::ConnectionStatus(ConnectionStatus::Syncing));
        let request_id = format!("resync-{}", self.last_observed_revision());
        let _ = self.request_snapshot(request_id).await;
    }

    /// Pure filter step: revision gating for public state, `toUid == myUid`
    /// and stale-snapshot discarding for private effects.
    fn apply(&self, event: ConnectionEvent) -> Option<FacadeEvent> {
        match event {
            ConnectionEvent::StateUpdate { revision, state } => {
                let mut tracker = self.tracker.lock().expect("tracker mutex poisoned");
                tracker.observe(revision).then_some(FacadeEvent::PublicState { revision, state })
            }
            ConnectionEvent::PrivateEffect { revision, to_uid, payload } => {
                if to_uid != self.my_uid {
                    return None;
                }
                if let PrivatePayload::Snapshot { request_id, .. } = &payload {
                    let inbox = self.snapshot_inbox.lock().expect("snapshot inbox mutex poisoned");
                    if !inbox.accepts(request_id) {
                        return None;
                    }
                    self.tracker.lock().expect("tracker mutex poisoned").observe(revision);
                }
                Some(FacadeEvent::PrivateEffect { revision, payload })
            }
            ConnectionEvent::StatusChanged(status) => {
                *self.status.lock().expect("status mutex poisoned") = status;
                Some(FacadeEvent::ConnectionStatus(status))
            }
        }
    }

    fn maybe_resume_live(&self, revision: Revision) {
        let mut status = self.status.lock().expect("status mutex poisoned");
        if matches!(*status, ConnectionStatus::Syncing) && revision >= self.last_observed_revision() {
            *status = ConnectionStatus::Live;
        }
    }

    pub async fn submit_intent(&self, intent: Intent) -> Result<(), ConnectionError> {
        self.port.send_intent(intent, self.last_observed_revision()).await
    }

    pub async fn request_snapshot(&self, request_id: String) -> Result<(), ConnectionError> {
        self.snapshot_inbox
            .lock()
            .expect("snapshot inbox mutex poisoned")
            .begin_request(request_id.clone());
        self.submit_intent(Intent::RequestSnapshot { request_id }).await
    }

    pub async fn force_sync(&self) -> Result<(), ConnectionError> {
        self.submit_intent(Intent::ForceSync).await
    }

    pub async fn disconnect(&self) {
        self.port.disconnect().await;
        *self.status.lock().expect("status mutex poisoned") = ConnectionStatus::Disconnected;
    }
}

impl FacadeEvent {
    fn revision(&self) -> Revision {
        match self {
            FacadeEvent::PublicState { revision, .. } => *revision,
            FacadeEvent::PrivateEffect { revision, .. } => *revision,
            FacadeEvent::ConnectionStatus(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_domain::{BlockedReason, BroadcastGameState, RoomStatus};
    use nightfall_player_ports::MockServerConnectionPort;
    use std::collections::BTreeMap;

    fn sample_state(revision: Revision) -> BroadcastGameState {
        BroadcastGameState {
            room_code: RoomCode::new(1).unwrap(),
            host_uid: "host".to_string(),
            status: RoomStatus::Unseated,
            template_roles: Vec::new(),
            players: BTreeMap::new(),
            current_step_index: None,
            current_step_id: None,
            is_audio_playing: false,
            wolf_vote_status: BTreeMap::new(),
            wolf_vote_deadline: None,
            seer_label_map: BTreeMap::new(),
            last_night_deaths: None,
            revision,
        }
    }

    fn facade() -> Arc<ClientFacade> {
        ClientFacade::new(Arc::new(MockServerConnectionPort::new()), RoomCode::new(1).unwrap(), "u1".to_string(), false)
    }

    #[test]
    fn drops_stale_public_state() {
        let facade = facade();
        assert!(facade
            .apply(ConnectionEvent::StateUpdate { revision: 17, state: sample_state(17) })
            .is_some());
        assert!(facade
            .apply(ConnectionEvent::StateUpdate { revision: 14, state: sample_state(14) })
            .is_none());
    }

    #[test]
    fn filters_private_effects_not_addressed_to_me() {
        let facade = facade();
        let event = ConnectionEvent::PrivateEffect {
            revision: 1,
            to_uid: "someone-else".to_string(),
            payload: PrivatePayload::Blocked { reason: BlockedReason::Nightmare },
        };
        assert!(facade.apply(event).is_none());
    }

    #[test]
    fn host_does_not_privilege_itself_for_private_effects() {
        let facade = ClientFacade::new(Arc::new(MockServerConnectionPort::new()), RoomCode::new(1).unwrap(), "host-uid".to_string(), true);
        let event = ConnectionEvent::PrivateEffect {
            revision: 1,
            to_uid: "some-seated-player".to_string(),
            payload: PrivatePayload::Blocked { reason: BlockedReason::Nightmare },
        };
        assert!(facade.apply(event).is_none());
    }

    #[test]
    fn discards_snapshot_response_to_a_superseded_request() {
        let facade = facade();
        facade.snapshot_inbox.lock().unwrap().begin_request("r1".to_string());
        facade.snapshot_inbox.lock().unwrap().begin_request("r2".to_string());

        let stale = ConnectionEvent::PrivateEffect {
            revision: 9,
            to_uid: "u1".to_string(),
            payload: PrivatePayload::Snapshot {
                request_id: Some("r1".to_string()),
                full_state: Box::new(sample_state(9)),
                own_role: None,
            },
        };
        assert!(facade.apply(stale).is_none());
        assert_eq!(facade.last_observed_revision(), 0);
    }
}
