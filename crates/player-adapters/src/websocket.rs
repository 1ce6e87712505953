//! Native `ServerConnectionPort` over `tokio-tungstenite`.
//!
//! Mirrors the engine side's connection handling: the socket is split into
//! a read half and a write half, a dedicated task drains an outbound
//! channel onto the write half so a slow caller never blocks `send_intent`,
//! and a read task turns inbound `ServerEnvelope` frames into
//! `ConnectionEvent`s on the channel returned from `connect`. The channel
//! simply closing is the disconnect signal -- this adapter does not retry;
//! `ClientFacade` owns the reconnect decision.

use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use nightfall_domain::{Revision, RoomCode, Uid};
use nightfall_player_ports::{ConnectionError, ConnectionEvent, ServerConnectionPort};
use nightfall_protocol::{ClientEnvelope, Intent, ServerEnvelope};

/// Connects to a server's `/ws` route over `ws://` or `wss://`. `base_url`
/// is the scheme+host+port only (e.g. `ws://127.0.0.1:3000`); the route and
/// query string are appended per connection.
pub struct TungsteniteConnectionPort {
    base_url: Url,
    outbound: Mutex<Option<mpsc::UnboundedSender<String>>>,
}

impl TungsteniteConnectionPort {
    pub fn new(base_url: Url) -> Self {
        Self { base_url, outbound: Mutex::new(None) }
    }

    fn connect_url(&self, room_code: RoomCode, uid: &Uid, is_host: bool) -> Result<Url, ConnectionError> {
        let mut url = self
            .base_url
            .join("/ws")
            .map_err(|error| ConnectionError::Transport(error.to_string()))?;
        url.query_pairs_mut()
            .append_pair("room", &room_code.to_string())
            .append_pair("uid", uid)
            .append_pair("host", if is_host { "true" } else { "false" });
        Ok(url)
    }
}

#[async_trait]
impl ServerConnectionPort for TungsteniteConnectionPort {
    async fn connect(
        &self,
        room_code: RoomCode,
        uid: Uid,
        is_host: bool,
    ) -> Result<mpsc::UnboundedReceiver<ConnectionEvent>, ConnectionError> {
        let url = self.connect_url(room_code, &uid, is_host)?;
        let (stream, _) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|error| ConnectionError::Transport(error.to_string()))?;
        let (mut ws_sender, mut ws_receiver) = stream.split();

        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();
        *self.outbound.lock().expect("outbound mutex poisoned") = Some(outbound_tx);

        tokio::spawn(async move {
            while let Some(json) = outbound_rx.recv().await {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        });

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(frame) = ws_receiver.next().await {
                match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerEnvelope>(&text) {
                        Ok(ServerEnvelope::StateUpdate { revision, state }) => {
                            if event_tx.send(ConnectionEvent::StateUpdate { revision, state }).is_err() {
                                break;
                            }
                        }
                        Ok(ServerEnvelope::PrivateEffect { to_uid, revision, payload }) => {
                            if event_tx
                                .send(ConnectionEvent::PrivateEffect { revision, to_uid, payload })
                                .is_err()
                            {
                                break;
                            }
                        }
                        Err(error) => tracing::warn!(%error, "failed to parse server envelope"),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(error) => {
                        tracing::warn!(%error, "websocket read error");
                        break;
                    }
                }
            }
        });

        Ok(event_rx)
    }

    async fn send_intent(&self, intent: Intent, client_revision: Revision) -> Result<(), ConnectionError> {
        let sender = self
            .outbound
            .lock()
            .expect("outbound mutex poisoned")
            .clone()
            .ok_or(ConnectionError::NotConnected)?;
        let envelope = ClientEnvelope::new(intent, client_revision);
        let json = serde_json::to_string(&envelope).map_err(|error| ConnectionError::Transport(error.to_string()))?;
        sender.send(json).map_err(|_| ConnectionError::NotConnected)
    }

    async fn disconnect(&self) {
        self.outbound.lock().expect("outbound mutex poisoned").take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_url_carries_room_uid_and_host_flag() {
        let port = TungsteniteConnectionPort::new(Url::parse("ws://127.0.0.1:3000").unwrap());
        let url = port
            .connect_url(RoomCode::new(4242).unwrap(), &"u1".to_string(), true)
            .unwrap();
        assert_eq!(url.path(), "/ws");
        let pairs: Vec<_> = url.query_pairs().collect();
        assert!(pairs.contains(&("room".into(), "4242".into())));
        assert!(pairs.contains(&("uid".into(), "u1".into())));
        assert!(pairs.contains(&("host".into(), "true".into())));
    }

    #[tokio::test]
    async fn send_intent_without_a_connection_fails() {
        let port = TungsteniteConnectionPort::new(Url::parse("ws://127.0.0.1:3000").unwrap());
        let result = port.send_intent(Intent::ForceSync, 0).await;
        assert!(matches!(result, Err(ConnectionError::NotConnected)));
    }
}
