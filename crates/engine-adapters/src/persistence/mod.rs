//! Persistence adapters: room snapshot storage. Two concrete
//! `PersistencePort` implementations -- an in-memory repository and a
//! file-backed one -- callers pick whichever fits their deployment; both
//! share the same collision-retry room-code allocation.

mod file_snapshot;
mod in_memory;

pub use file_snapshot::FileSnapshotPersistence;
pub use in_memory::InMemoryPersistence;

use rand::Rng;

use nightfall_domain::RoomCode;

/// Retry budget for room-code collisions: on collision the Host retries
/// with a fresh code before confirming the room.
const CREATE_ROOM_ATTEMPTS: usize = 50;

fn random_room_code() -> RoomCode {
    let value = rand::thread_rng().gen_range(0..=9999);
    RoomCode::new(value).expect("0..=9999 always fits RoomCode")
}
