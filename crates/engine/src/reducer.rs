//! Reducer & store: `(state, reducerAction) -> state'`. Every variant is
//! a pure, total transformation; no I/O, no randomness, no wall-clock
//! reads (the clock is an injected port at the handler/flow layer, never
//! here).

use chrono::{DateTime, Utc};

use nightfall_domain::{
    AckKey, ActionInput, ConfirmStatus, CurrentNightResults, GameState, Player, RecordedAction,
    RoleId, RoomStatus, Seat, SchemaId, Uid, WitchContext,
};

use crate::night_plan::build_night_plan;
use crate::resolvers::NightResultsPatch;

/// The finite set of authoritative state transitions. `RecordWolfVote` is
/// the `wolfVotesBySeat` analogue of `RECORD_ACTION` for the one schema
/// kind (`wolfVote`) that is not recorded through the generic `actions`
/// log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReducerAction {
    PlayerJoin { seat: Seat, uid: Uid },
    PlayerLeave { seat: Seat },
    SetTemplate { roles: Vec<RoleId> },
    AssignRoles { roles_by_seat: std::collections::BTreeMap<Seat, RoleId>, seer_label_map: std::collections::BTreeMap<RoleId, u8> },
    MarkViewedRole { seat: Seat },
    StartNight,
    RecordAction { seat: Seat, schema_id: SchemaId, input: ActionInput, at: DateTime<Utc> },
    RecordWolfVote { seat: Seat, target: Option<Seat> },
    ApplyResolverResult { patch: NightResultsPatch },
    AdvanceStep { to_index: Option<usize> },
    SetPendingRevealAck { to_uid: Uid },
    ClearRevealAck { to_uid: Uid, revision: nightfall_domain::Revision },
    SetAudioPlaying { playing: bool },
    SetWitchContext { context: Option<WitchContext> },
    SetConfirmStatus { status: Option<ConfirmStatus> },
    SetWolfVoteDeadline { deadline: Option<DateTime<Utc>> },
    EndNight { deaths: Vec<Seat> },
    FatalError { reason: String },
    Restart,
}

/// Applies one reducer action to `state`, returning the next state.
/// Handler invocations apply a batch of these in array order; if any panics
/// (it cannot: every branch here is total) the batch would not commit --
/// in practice every branch is infallible over a well-formed `GameState`.
pub fn apply(mut state: GameState, action: ReducerAction) -> GameState {
    match action {
        ReducerAction::PlayerJoin { seat, uid } => {
            state.players.insert(seat, Some(Player::new(uid, seat)));
            if state.status == RoomStatus::Unseated {
                state.status = RoomStatus::Seated;
            }
        }
        ReducerAction::PlayerLeave { seat } => {
            state.players.insert(seat, None);
            if state.status == RoomStatus::Seated && state.seated_count() == 0 {
                state.status = RoomStatus::Unseated;
            }
        }
        ReducerAction::SetTemplate { roles } => {
            state.template_roles = roles;
        }
        ReducerAction::AssignRoles { roles_by_seat, seer_label_map } => {
            for (seat, role) in roles_by_seat {
                if let Some(Some(player)) = state.players.get_mut(&seat) {
                    player.role = Some(role);
                }
            }
            state.seer_label_map = seer_label_map;
            state.status = RoomStatus::Assigned;
        }
        ReducerAction::MarkViewedRole { seat } => {
            if let Some(Some(player)) = state.players.get_mut(&seat) {
                player.has_viewed_role = true;
            }
        }
        ReducerAction::StartNight => {
            let roles: Vec<RoleId> = state.template_roles.clone();
            state.night_plan = build_night_plan(&roles);
            state.status = RoomStatus::Ongoing;
            state.current_step_index = if state.night_plan.is_empty() { None } else { Some(0) };
            state.current_step_id = state.night_plan.step_at(0).map(|s| s.schema_id);
        }
        ReducerAction::RecordAction { seat, schema_id, input, at } => {
            state.actions.push(RecordedAction { seat, schema_id, input, at });
        }
        ReducerAction::RecordWolfVote { seat, target } => {
            state.wolf_votes_by_seat.insert(seat, target);
        }
        ReducerAction::ApplyResolverResult { patch } => {
            patch.apply_to(&mut state.current_night_results);
            if let Some(new_targets) = patch.hypnotized_seats_merge {
                for seat in new_targets {
                    if !state.hypnotized_seats.contains(&seat) {
                        state.hypnotized_seats.push(seat);
                    }
                }
                state.hypnotized_seats.sort_unstable();
            }
        }
        ReducerAction::AdvanceStep { to_index } => {
            state.current_step_index = to_index;
            state.current_step_id = to_index.and_then(|i| state.night_plan.step_at(i)).map(|s| s.schema_id);
            state.wolf_votes_by_seat.clear();
            state.wolf_vote_deadline = None;
        }
        ReducerAction::SetPendingRevealAck { to_uid } => {
            state.pending_reveal_acks.push(AckKey { to_uid, revision: state.revision });
        }
        ReducerAction::ClearRevealAck { to_uid, revision } => {
            if let Some(pos) = state
                .pending_reveal_acks
                .iter()
                .position(|ack| ack.to_uid == to_uid && ack.revision == revision)
            {
                state.pending_reveal_acks.remove(pos);
            }
        }
        ReducerAction::SetAudioPlaying { playing } => {
            state.is_audio_playing = playing;
        }
        ReducerAction::SetWitchContext { context } => {
            state.witch_context = context;
        }
        ReducerAction::SetConfirmStatus { status } => {
            state.confirm_status = status;
        }
        ReducerAction::SetWolfVoteDeadline { deadline } => {
            state.wolf_vote_deadline = deadline;
        }
        ReducerAction::EndNight { deaths } => {
            state.status = RoomStatus::Ended;
            state.last_night_deaths = deaths;
            state.current_step_index = None;
            state.current_step_id = None;
        }
        ReducerAction::FatalError { reason } => {
            state.status = RoomStatus::Ended;
            state.fatal_error = Some(reason);
            state.current_step_index = None;
            state.current_step_id = None;
        }
        ReducerAction::Restart => {
            let seat_count = state.players.len() as u8;
            let room_code = state.room_code;
            let host_uid = state.host_uid.clone();
            state = GameState::new(room_code, host_uid, seat_count);
        }
    }
    state
}

/// Applies a batch in order: emitted reducer actions are applied in array
/// order atomically.
pub fn apply_all(mut state: GameState, actions: Vec<ReducerAction>) -> GameState {
    for action in actions {
        state = apply(state, action);
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use nightfall_domain::RoomCode;

    fn fresh() -> GameState {
        GameState::new(RoomCode::new(1).unwrap(), "host".into(), 2)
    }

    #[test]
    fn player_join_transitions_unseated_to_seated() {
        let state = apply(fresh(), ReducerAction::PlayerJoin { seat: 0, uid: "u0".into() });
        assert_eq!(state.status, RoomStatus::Seated);
    }

    #[test]
    fn start_night_builds_plan_and_enters_first_step() {
        let mut state = fresh();
        state = apply(state, ReducerAction::SetTemplate { roles: vec![RoleId::Wolf, RoleId::Villager] });
        state = apply(state, ReducerAction::StartNight);
        assert_eq!(state.status, RoomStatus::Ongoing);
        assert_eq!(state.current_step_index, Some(0));
        assert_eq!(state.current_step_id, Some(SchemaId::WolfKill));
    }

    #[test]
    fn start_night_with_all_villagers_has_no_current_step() {
        let mut state = fresh();
        state = apply(state, ReducerAction::SetTemplate { roles: vec![RoleId::Villager, RoleId::Villager] });
        state = apply(state, ReducerAction::StartNight);
        assert_eq!(state.current_step_index, None);
        assert!(state.night_plan.is_empty());
    }

    #[test]
    fn advance_step_clears_wolf_round_state() {
        let mut state = fresh();
        state.wolf_votes_by_seat.insert(0, Some(1));
        state.wolf_vote_deadline = Some(Utc::now());
        state = apply(state, ReducerAction::AdvanceStep { to_index: None });
        assert!(state.wolf_votes_by_seat.is_empty());
        assert!(state.wolf_vote_deadline.is_none());
    }
}
