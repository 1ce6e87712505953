//! Night Flow Controller & Inline Progression: the pure function
//! that, given a fully-satisfied step, advances through as many steps as
//! it can, emitting audio effects, gated on audio playback, reveal
//! acknowledgements, and the wolf-vote deadline.

use chrono::{DateTime, Duration, Utc};

use nightfall_domain::{
    ConfirmStatus, GameState, RoleId, RoomStatus, Seat, SchemaId, WitchContext,
};
use nightfall_protocol::AudioEffect;

use crate::death::resolve_last_night_deaths;
use crate::reducer::{apply, ReducerAction};
use crate::registry::{get_role_spec, get_schema};
use crate::resolvers::NightResultsPatch;
use crate::resolvers::resolve_wolf_kill;

/// Default window a wolf meeting stays open before absent wolves count as
/// an empty vote (decision recorded in DESIGN.md).
pub const WOLF_VOTE_WINDOW: Duration = Duration::seconds(60);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressionOutcome {
    pub actions: Vec<ReducerAction>,
    pub audio_effects: Vec<AudioEffect>,
    pub steps_advanced: usize,
}

/// Runs the inline progression loop once. Collects every reducer action
/// and audio effect produced by however many steps can be auto-completed
/// right now; the caller (Host) applies the actions, bumps the revision
/// once, and dispatches the audio effects in order.
pub fn run_inline_progression(state: &GameState, now: DateTime<Utc>) -> ProgressionOutcome {
    let mut outcome = ProgressionOutcome::default();

    if state.status != RoomStatus::Ongoing {
        return outcome;
    }
    if state.is_audio_playing {
        return outcome;
    }
    if !state.pending_reveal_acks.is_empty() {
        return outcome;
    }

    let mut working = state.clone();

    loop {
        let Some(idx) = working.current_step_index else {
            break;
        };
        let Some(step) = working.night_plan.step_at(idx).copied() else {
            let fatal = ReducerAction::FatalError {
                reason: "current_step_index out of range of night_plan".into(),
            };
            working = apply(working, fatal.clone());
            outcome.actions.push(fatal);
            break;
        };

        let complete = if step.schema_id == SchemaId::WolfKill {
            wolf_vote_group_complete(&working, now)
        } else {
            step_complete(&working, step.role_id, step.schema_id)
        };

        if !complete {
            break;
        }

        // Resolve the wolf kill tally before advancing, since ADVANCE_STEP
        // clears `wolfVotesBySeat` for the next round.
        if step.schema_id == SchemaId::WolfKill {
            let votes = ordered_wolf_votes(&working);
            let target = resolve_wolf_kill(&votes);
            let mut patch = NightResultsPatch::default();
            patch.wolf_kill = Some(target);
            let action = ReducerAction::ApplyResolverResult { patch };
            working = apply(working, action.clone());
            outcome.actions.push(action);
        }

        outcome
            .audio_effects
            .push(step_end_audio(&working, &step));

        let next_index = next_step_index(&working, idx, step.schema_id);

        match next_index {
            None => {
                let deaths = resolve_last_night_deaths(&working.current_night_results);
                let advance = ReducerAction::AdvanceStep { to_index: None };
                working = apply(working, advance.clone());
                outcome.actions.push(advance);
                outcome.steps_advanced += 1;

                outcome.audio_effects.push(AudioEffect::night_end("night_end"));
                let end_night = ReducerAction::EndNight { deaths };
                working = apply(working, end_night.clone());
                outcome.actions.push(end_night);
                break;
            }
            Some(next_idx) => {
                let advance = ReducerAction::AdvanceStep { to_index: Some(next_idx) };
                working = apply(working, advance.clone());
                outcome.actions.push(advance);
                outcome.steps_advanced += 1;

                for action in derived_context_actions(&working, next_idx, now) {
                    working = apply(working, action.clone());
                    outcome.actions.push(action);
                }

                let Some(next_step) = working.night_plan.step_at(next_idx).copied() else {
                    let fatal = ReducerAction::FatalError {
                        reason: "advanced step index out of range of night_plan".into(),
                    };
                    working = apply(working, fatal.clone());
                    outcome.actions.push(fatal);
                    break;
                };
                outcome.audio_effects.push(step_begin_audio(&working, &next_step));
            }
        }
    }

    if !outcome.audio_effects.is_empty() && working.status == RoomStatus::Ongoing {
        let action = ReducerAction::SetAudioPlaying { playing: true };
        outcome.actions.push(action);
    }

    outcome
}

fn meeting_wolf_seats(state: &GameState) -> Vec<Seat> {
    state
        .players
        .iter()
        .filter_map(|(seat, player)| {
            let player = player.as_ref()?;
            let role = player.role?;
            get_role_spec(role).participates_in_wolf_vote.then_some(*seat)
        })
        .collect()
}

fn wolf_vote_group_complete(state: &GameState, now: DateTime<Utc>) -> bool {
    let meeting = meeting_wolf_seats(state);
    if meeting.is_empty() {
        return true;
    }
    let all_voted = meeting.iter().all(|seat| state.wolf_votes_by_seat.contains_key(seat));
    let deadline_passed = state.wolf_vote_deadline.is_some_and(|d| now >= d);
    all_voted || deadline_passed
}

fn ordered_wolf_votes(state: &GameState) -> Vec<(Seat, Option<Seat>)> {
    let mut order: Vec<Seat> = Vec::new();
    for recorded in &state.actions {
        if recorded.schema_id == SchemaId::WolfKill && !order.contains(&recorded.seat) {
            order.push(recorded.seat);
        }
    }
    for seat in meeting_wolf_seats(state) {
        if !order.contains(&seat) {
            order.push(seat);
        }
    }
    order
        .into_iter()
        .map(|seat| (seat, state.wolf_votes_by_seat.get(&seat).copied().flatten()))
        .collect()
}

fn pending_actor_seats(state: &GameState, role_id: RoleId) -> Vec<Seat> {
    state
        .players
        .iter()
        .filter_map(|(seat, player)| {
            player.as_ref().and_then(|p| (p.role == Some(role_id)).then_some(*seat))
        })
        .collect()
}

fn step_complete(state: &GameState, role_id: RoleId, schema_id: SchemaId) -> bool {
    pending_actor_seats(state, role_id)
        .iter()
        .all(|seat| state.actions.iter().any(|a| a.seat == *seat && a.schema_id == schema_id))
}

/// The `wolfKill` schema may appear as several adjacent plan steps (one per
/// distinct wolf `RoleId` present), since the Night Plan Builder
/// deduplicates by `roleId`, not by schema. All of them resolve together
/// as a single meeting, so advancing past one
/// advances past the whole contiguous run.
fn next_step_index(state: &GameState, current: usize, schema_id: SchemaId) -> Option<usize> {
    let mut idx = current + 1;
    if schema_id == SchemaId::WolfKill {
        while state
            .night_plan
            .step_at(idx)
            .is_some_and(|s| s.schema_id == SchemaId::WolfKill)
        {
            idx += 1;
        }
    }
    if idx >= state.night_plan.len() {
        None
    } else {
        Some(idx)
    }
}

fn derived_context_actions(state: &GameState, next_idx: usize, now: DateTime<Utc>) -> Vec<ReducerAction> {
    let mut actions = Vec::new();
    let step = state.night_plan.step_at(next_idx).copied();
    let role_id = step.map(|s| s.role_id);
    let schema_id = step.map(|s| s.schema_id);

    let witch_context = if role_id == Some(RoleId::Witch) {
        let killed_seat = state.current_night_results.wolf_kill_target;
        Some(WitchContext {
            killed_seat,
            can_save: killed_seat.is_some(),
            can_poison: true,
        })
    } else {
        None
    };
    actions.push(ReducerAction::SetWitchContext { context: witch_context });

    let is_confirm = schema_id.is_some_and(|s| {
        matches!(s, SchemaId::HunterConfirm | SchemaId::DarkWolfKingConfirm | SchemaId::BloodMoonConfirm)
    });
    let confirm_status = match (is_confirm, role_id) {
        (true, Some(role_id)) => Some(ConfirmStatus { pending_seats: pending_actor_seats(state, role_id) }),
        _ => None,
    };
    actions.push(ReducerAction::SetConfirmStatus { status: confirm_status });

    let deadline = if schema_id == Some(SchemaId::WolfKill) {
        Some(now + WOLF_VOTE_WINDOW)
    } else {
        None
    };
    actions.push(ReducerAction::SetWolfVoteDeadline { deadline });

    actions
}

fn audio_key_for(state: &GameState, step: &nightfall_domain::NightPlanStep) -> String {
    match step.role_id {
        RoleId::Seer | RoleId::MirrorSeer => {
            nightfall_protocol::resolve_seer_audio_key(step.role_id, &state.seer_label_map)
        }
        _ => get_schema(step.schema_id)
            .map(|s| s.ui.audio_key.to_string())
            .unwrap_or_else(|_| "unknown".to_string()),
    }
}

fn step_end_audio(state: &GameState, step: &nightfall_domain::NightPlanStep) -> AudioEffect {
    AudioEffect::end(audio_key_for(state, step), step.schema_id)
}

fn step_begin_audio(state: &GameState, step: &nightfall_domain::NightPlanStep) -> AudioEffect {
    AudioEffect::begin(audio_key_for(state, step), step.schema_id)
}
