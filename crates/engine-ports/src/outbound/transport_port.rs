//! Transport port: delivery of server envelopes to connected clients. The
//! engine never touches WebSocket frames directly -- it emits a public
//! broadcast or a private message and the adapter routes bytes.

use async_trait::async_trait;

use nightfall_domain::{BroadcastGameState, PrivateMessage, RoomCode};

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TransportPort: Send + Sync {
    /// Broadcast the public game state to every connection in the room.
    async fn publish_state(&self, room_code: RoomCode, state: BroadcastGameState);

    /// Deliver a private message to a single recipient (`message.to_uid`).
    async fn publish_private(&self, room_code: RoomCode, message: PrivateMessage);
}
