use async_trait::async_trait;
use tokio::sync::mpsc;

use nightfall_domain::{Revision, RoomCode, Uid};
use nightfall_protocol::Intent;

use crate::error::ConnectionError;
use crate::event::ConnectionEvent;

/// One room connection. `connect` is the only call that yields inbound
/// traffic -- everything the transport receives afterward arrives on the
/// returned channel until the connection drops or `disconnect` is called.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ServerConnectionPort: Send + Sync {
    async fn connect(
        &self,
        room_code: RoomCode,
        uid: Uid,
        is_host: bool,
    ) -> Result<mpsc::UnboundedReceiver<ConnectionEvent>, ConnectionError>;

    async fn send_intent(&self, intent: Intent, client_revision: Revision) -> Result<(), ConnectionError>;

    async fn disconnect(&self);
}
