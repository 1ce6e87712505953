//! Persistence port: room snapshot storage. The Host never knows whether
//! snapshots live in memory, on disk, or in a database.

use async_trait::async_trait;

use nightfall_domain::{GameState, RoomCode};

use crate::error::PortError;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PersistencePort: Send + Sync {
    /// Reserve a fresh room code and persist the initial state under it.
    /// Implementations retry on collision internally before giving up with
    /// `PortError::RoomCodeSpaceExhausted`.
    async fn create_room(&self, initial_state: GameState) -> Result<RoomCode, PortError>;

    async fn load(&self, room_code: RoomCode) -> Result<GameState, PortError>;

    async fn save(&self, state: &GameState) -> Result<(), PortError>;
}
