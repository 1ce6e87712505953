//! `BroadcastGameState`: the public subset of `GameState`.
//!
//! Construction (the visibility filter) lives in `nightfall-engine::broadcast`;
//! this module only carries the whitelisted shape so protocol/player crates
//! can depend on it without pulling in engine logic.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{Revision, RoomCode, Seat, Uid};
use crate::role::RoleId;
use crate::schema::SchemaId;
use crate::state::RoomStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub uid: Uid,
    pub seat: Seat,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub has_viewed_role: bool,
    /// Only present for the seat owner's own view, or for everyone once
    /// `status == Ended`.
    pub role: Option<RoleId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfVoteStatusEntry {
    pub has_voted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastGameState {
    pub room_code: RoomCode,
    pub host_uid: Uid,
    pub status: RoomStatus,
    pub template_roles: Vec<RoleId>,
    pub players: BTreeMap<Seat, Option<PlayerPublic>>,
    pub current_step_index: Option<usize>,
    pub current_step_id: Option<SchemaId>,
    pub is_audio_playing: bool,
    pub wolf_vote_status: BTreeMap<Seat, WolfVoteStatusEntry>,
    pub wolf_vote_deadline: Option<DateTime<Utc>>,
    pub seer_label_map: BTreeMap<RoleId, u8>,
    /// Only populated after end-of-night.
    pub last_night_deaths: Option<Vec<Seat>>,
    pub revision: Revision,
}

/// The sensitive keys that must never appear in a `BroadcastGameState`.
/// Exposed so tests can assert by name that nothing slipped in via an ad
/// hoc `serde_json::Value` comparison.
pub const SENSITIVE_FIELD_NAMES: &[&str] = &[
    "actions",
    "currentNightResults",
    "witchContext",
    "seerReveal",
    "psychicReveal",
    "wolfRobotReveal",
    "gargoyleReveal",
    "pureWhiteReveal",
    "pendingRevealAcks",
    "hypnotizedSeats",
    "blockedSeat",
    "confirmStatus",
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Serializes a representative `BroadcastGameState` and asserts none
    /// of the sensitive field names appear anywhere in the JSON keys,
    /// guarding against a field re-appearing here by accident as the
    /// struct evolves.
    #[test]
    fn serialized_broadcast_never_contains_a_sensitive_key() {
        let mut players = BTreeMap::new();
        players.insert(
            0,
            Some(PlayerPublic {
                uid: "u0".to_string(),
                seat: 0,
                display_name: None,
                avatar_url: None,
                has_viewed_role: true,
                role: None,
            }),
        );

        let state = BroadcastGameState {
            room_code: RoomCode::new(1).unwrap(),
            host_uid: "host".to_string(),
            status: RoomStatus::Ongoing,
            template_roles: vec![RoleId::Seer, RoleId::Wolf],
            players,
            current_step_index: Some(0),
            current_step_id: Some(SchemaId::SeerCheck),
            is_audio_playing: false,
            wolf_vote_status: BTreeMap::new(),
            wolf_vote_deadline: None,
            seer_label_map: BTreeMap::new(),
            last_night_deaths: None,
            revision: 3,
        };

        let json = serde_json::to_string(&state).expect("BroadcastGameState always serializes");
        for sensitive in SENSITIVE_FIELD_NAMES {
            assert!(
                !json.contains(sensitive),
                "serialized broadcast leaked sensitive field `{sensitive}`"
            );
        }
    }
}
