use nightfall_domain::{BroadcastGameState, PrivatePayload, Revision, Uid};

/// `connectionStatus ∈ {live, syncing, connecting, disconnected}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Live,
    Syncing,
    Disconnected,
}

/// What a connection hands the client facade, in wire order, with nothing
/// filtered yet -- revision gating and the `toUid == myUid` private filter
/// are the facade's job, not the port's.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    StateUpdate {
        revision: Revision,
        state: BroadcastGameState,
    },
    PrivateEffect {
        revision: Revision,
        to_uid: Uid,
        payload: PrivatePayload,
    },
    StatusChanged(ConnectionStatus),
}
