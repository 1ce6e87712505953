//! Axum WebSocket `TransportPort`.
//!
//! One room maps to a set of connections, one connection to one uid (a uid
//! may hold at most one open socket; a second connection from the same uid
//! replaces the first, mirroring a browser tab refresh). Each connection
//! gets an unbounded channel; a dedicated send task drains it onto the
//! socket so a slow reader never blocks `publish_state`/`publish_private`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::{mpsc, RwLock};

use nightfall_domain::{BroadcastGameState, PrivateMessage, RoomCode, Uid};
use nightfall_engine::Host;
use nightfall_engine_ports::{HandlerContext, PortError, TransportPort};
use nightfall_protocol::{ClientEnvelope, ServerEnvelope};

type RoomConnections = HashMap<Uid, mpsc::UnboundedSender<ServerEnvelope>>;

/// Connection registry backing `WebSocketTransport`. Lives behind an `Arc`
/// so the transport and the router's per-connection tasks share one table.
#[derive(Default)]
struct ConnectionRegistry {
    rooms: RwLock<HashMap<RoomCode, RoomConnections>>,
}

impl ConnectionRegistry {
    async fn register(&self, room_code: RoomCode, uid: Uid, sender: mpsc::UnboundedSender<ServerEnvelope>) {
        let mut rooms = self.rooms.write().await;
        rooms.entry(room_code).or_default().insert(uid, sender);
    }

    async fn unregister(&self, room_code: RoomCode, uid: &Uid) {
        let mut rooms = self.rooms.write().await;
        if let Some(conns) = rooms.get_mut(&room_code) {
            conns.remove(uid);
            if conns.is_empty() {
                rooms.remove(&room_code);
            }
        }
    }

    async fn broadcast(&self, room_code: RoomCode, envelope: ServerEnvelope) {
        let rooms = self.rooms.read().await;
        let Some(conns) = rooms.get(&room_code) else {
            return;
        };
        for sender in conns.values() {
            let _ = sender.send(envelope.clone());
        }
    }

    async fn send_to(&self, room_code: RoomCode, uid: &Uid, envelope: ServerEnvelope) {
        let rooms = self.rooms.read().await;
        if let Some(sender) = rooms.get(&room_code).and_then(|conns| conns.get(uid)) {
            let _ = sender.send(envelope);
        }
    }
}

/// Production `TransportPort`: routes broadcasts and private messages to
/// whichever connections are currently registered for a room. A recipient
/// with no open socket simply misses the message -- it resyncs via
/// `REQUEST_SNAPSHOT` on reconnect, so silent drops here are correct, not
/// a bug.
#[derive(Clone, Default)]
pub struct WebSocketTransport {
    registry: Arc<ConnectionRegistry>,
}

impl WebSocketTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransportPort for WebSocketTransport {
    async fn publish_state(&self, room_code: RoomCode, state: BroadcastGameState) {
        let envelope = ServerEnvelope::StateUpdate { revision: state.revision, state };
        self.registry.broadcast(room_code, envelope).await;
    }

    async fn publish_private(&self, room_code: RoomCode, message: PrivateMessage) {
        let envelope = ServerEnvelope::PrivateEffect {
            to_uid: message.to_uid.clone(),
            revision: message.revision,
            payload: message.payload,
        };
        self.registry.send_to(room_code, &message.to_uid, envelope).await;
    }
}

#[derive(Clone)]
struct WebSocketState {
    host: Host,
    registry: Arc<ConnectionRegistry>,
}

#[derive(Debug, Deserialize)]
struct ConnectQuery {
    room: RoomCode,
    uid: Uid,
    #[serde(default)]
    host: bool,
}

/// Builds the `/ws` route. The caller owns composing this into the rest of
/// the HTTP router (CORS, tracing, other routes) -- this module only knows
/// about the socket itself.
pub fn websocket_router(host: Host, transport: &WebSocketTransport) -> Router {
    let state = WebSocketState { host, registry: transport.registry.clone() };
    Router::new().route("/ws", get(ws_handler)).with_state(state)
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<ConnectQuery>,
    State(state): State<WebSocketState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, query))
}

async fn handle_socket(socket: WebSocket, state: WebSocketState, query: ConnectQuery) {
    let ConnectQuery { room: room_code, uid, host: is_host } = query;
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEnvelope>();
    state.registry.register(room_code, uid.clone(), tx).await;

    tracing::info!(%room_code, %uid, is_host, "websocket connected");

    let send_task = tokio::spawn(async move {
        while let Some(envelope) = rx.recv().await {
            match serde_json::to_string(&envelope) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(error) => tracing::error!(%error, "failed to serialize server envelope"),
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEnvelope>(&text) {
                Ok(envelope) => {
                    let ctx = HandlerContext::new(room_code, uid.clone(), is_host);
                    if let Err(error) = state.host.handle(ctx, envelope.intent).await {
                        tracing::warn!(%error, %room_code, %uid, "failed to handle intent");
                        if matches!(error, PortError::RoomNotFound(_)) {
                            break;
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, %uid, "failed to parse client envelope");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(%error, %uid, "websocket error");
                break;
            }
        }
    }

    state.registry.unregister(room_code, &uid).await;
    send_task.abort();
    tracing::info!(%room_code, %uid, "websocket disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_domain::RoomStatus;
    use std::collections::BTreeMap;

    fn sample_state(room_code: RoomCode) -> BroadcastGameState {
        BroadcastGameState {
            room_code,
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
            revision: 1,
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_only_registered_room() {
        let transport = WebSocketTransport::new();
        let room_a = RoomCode::new(1).unwrap();
        let room_b = RoomCode::new(2).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        transport.registry.register(room_a, "u1".to_string(), tx).await;

        transport.publish_state(room_a, sample_state(room_a)).await;
        transport.publish_state(room_b, sample_state(room_b)).await;

        let received = rx.try_recv().expect("expected a message for room_a");
        match received {
            ServerEnvelope::StateUpdate { state, .. } => assert_eq!(state.room_code, room_a),
            _ => panic!("unexpected envelope"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn private_message_only_reaches_its_uid() {
        let transport = WebSocketTransport::new();
        let room = RoomCode::new(3).unwrap();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        transport.registry.register(room, "u1".to_string(), tx_a).await;
        transport.registry.register(room, "u2".to_string(), tx_b).await;

        let message = PrivateMessage {
            to_uid: "u1".to_string(),
            revision: 5,
            payload: nightfall_domain::PrivatePayload::Blocked { reason: nightfall_domain::BlockedReason::Nightmare },
        };
        transport.publish_private(room, message).await;

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn unregister_drops_future_broadcasts() {
        let transport = WebSocketTransport::new();
        let room = RoomCode::new(4).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        transport.registry.register(room, "u1".to_string(), tx).await;
        transport.registry.unregister(room, &"u1".to_string()).await;

        transport.publish_state(room, sample_state(room)).await;
        assert!(rx.try_recv().is_err());
    }
}
