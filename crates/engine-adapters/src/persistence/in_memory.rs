//! In-memory `PersistencePort`: a room-code-keyed map behind a
//! `tokio::sync::RwLock`. Suitable for tests and single-process
//! deployments where snapshots need not survive a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use nightfall_domain::{GameState, RoomCode};
use nightfall_engine_ports::{PersistencePort, PortError};

use super::{random_room_code, CREATE_ROOM_ATTEMPTS};

#[derive(Default)]
pub struct InMemoryPersistence {
    rooms: RwLock<HashMap<RoomCode, GameState>>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistencePort for InMemoryPersistence {
    async fn create_room(&self, mut initial_state: GameState) -> Result<RoomCode, PortError> {
        let mut rooms = self.rooms.write().await;
        for _ in 0..CREATE_ROOM_ATTEMPTS {
            let code = if rooms.contains_key(&initial_state.room_code) {
                random_room_code()
            } else {
                initial_state.room_code
            };
            if !rooms.contains_key(&code) {
                initial_state.room_code = code;
                rooms.insert(code, initial_state);
                return Ok(code);
            }
        }
        Err(PortError::RoomCodeSpaceExhausted)
    }

    async fn load(&self, room_code: RoomCode) -> Result<GameState, PortError> {
        self.rooms
            .read()
            .await
            .get(&room_code)
            .cloned()
            .ok_or_else(|| PortError::RoomNotFound(room_code.to_string()))
    }

    async fn save(&self, state: &GameState) -> Result<(), PortError> {
        self.rooms.write().await.insert(state.room_code, state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_domain::RoomStatus;

    fn state(code: u16) -> GameState {
        GameState::new(RoomCode::new(code).unwrap(), "host".into(), 2)
    }

    #[tokio::test]
    async fn create_load_save_round_trip() {
        let store = InMemoryPersistence::new();
        let code = store.create_room(state(100)).await.unwrap();
        let mut loaded = store.load(code).await.unwrap();
        assert_eq!(loaded.status, RoomStatus::Unseated);

        loaded.status = RoomStatus::Seated;
        store.save(&loaded).await.unwrap();
        let reloaded = store.load(code).await.unwrap();
        assert_eq!(reloaded.status, RoomStatus::Seated);
    }

    #[tokio::test]
    async fn create_room_reassigns_code_on_collision() {
        let store = InMemoryPersistence::new();
        let first = store.create_room(state(200)).await.unwrap();
        let second = store.create_room(state(200)).await.unwrap();
        assert_eq!(first.value(), 200);
        assert_ne!(second.value(), 200);
    }

    #[tokio::test]
    async fn load_missing_room_is_an_error() {
        let store = InMemoryPersistence::new();
        assert!(store.load(RoomCode::new(9).unwrap()).await.is_err());
    }
}
