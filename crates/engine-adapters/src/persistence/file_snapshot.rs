//! File-backed `PersistencePort`: one JSON snapshot per room under
//! `AppConfig::snapshot_dir`, fronted by the same in-memory map so a
//! mid-night `load` doesn't round-trip through disk on every handler call.
//! On rejoin as Host, the latest snapshot on disk is authoritative.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use nightfall_domain::{GameState, RoomCode};
use nightfall_engine_ports::{PersistencePort, PortError};

use super::{random_room_code, CREATE_ROOM_ATTEMPTS};

pub struct FileSnapshotPersistence {
    dir: PathBuf,
    cache: RwLock<HashMap<RoomCode, GameState>>,
}

impl FileSnapshotPersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), cache: RwLock::new(HashMap::new()) }
    }

    fn path_for(&self, room_code: RoomCode) -> PathBuf {
        self.dir.join(format!("{room_code}.json"))
    }

    async fn write_through(&self, state: &GameState) -> Result<(), PortError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?;
        let bytes = serde_json::to_vec_pretty(state).map_err(|e| PortError::Storage(e.to_string()))?;
        tokio::fs::write(self.path_for(state.room_code), bytes)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))
    }

    async fn read_from_disk(&self, room_code: RoomCode) -> Option<GameState> {
        let path = self.path_for(room_code);
        if !Path::new(&path).exists() {
            return None;
        }
        let bytes = tokio::fs::read(path).await.ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[async_trait]
impl PersistencePort for FileSnapshotPersistence {
    async fn create_room(&self, mut initial_state: GameState) -> Result<RoomCode, PortError> {
        let mut cache = self.cache.write().await;
        for _ in 0..CREATE_ROOM_ATTEMPTS {
            let candidate = if cache.contains_key(&initial_state.room_code)
                || self.read_from_disk(initial_state.room_code).await.is_some()
            {
                random_room_code()
            } else {
                initial_state.room_code
            };
            if !cache.contains_key(&candidate) {
                initial_state.room_code = candidate;
                self.write_through(&initial_state).await?;
                cache.insert(candidate, initial_state);
                return Ok(candidate);
            }
        }
        Err(PortError::RoomCodeSpaceExhausted)
    }

    async fn load(&self, room_code: RoomCode) -> Result<GameState, PortError> {
        if let Some(state) = self.cache.read().await.get(&room_code).cloned() {
            return Ok(state);
        }
        let state = self
            .read_from_disk(room_code)
            .await
            .ok_or_else(|| PortError::RoomNotFound(room_code.to_string()))?;
        self.cache.write().await.insert(room_code, state.clone());
        Ok(state)
    }

    async fn save(&self, state: &GameState) -> Result<(), PortError> {
        self.write_through(state).await?;
        self.cache.write().await.insert(state.room_code, state.clone());
        Ok(())
    }
}
