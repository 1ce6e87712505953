//! Intent handlers: the dispatch layer. One handler per intent kind checks
//! authority/authorization, invokes a resolver, and returns reducer
//! actions plus any private messages to deliver. Handlers never touch a
//! transport connection or persistence directly -- that is the Host's
//! job, in `host.rs`.

mod action;
mod lifecycle;
mod seating;

use chrono::{DateTime, Utc};

use nightfall_domain::{GameState, PrivateMessage, RejectReason, Seat, Uid};
use nightfall_engine_ports::HandlerContext;
use nightfall_protocol::Intent;

use crate::reducer::ReducerAction;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerOutput {
    pub success: bool,
    pub reason: Option<RejectReason>,
    pub actions: Vec<ReducerAction>,
    pub private_messages: Vec<PrivateMessage>,
}

impl HandlerOutput {
    pub fn ok(actions: Vec<ReducerAction>) -> Self {
        Self { success: true, reason: None, actions, private_messages: Vec::new() }
    }

    pub fn ok_with_private(actions: Vec<ReducerAction>, private_messages: Vec<PrivateMessage>) -> Self {
        Self { success: true, reason: None, actions, private_messages }
    }

    pub fn reject(reason: RejectReason) -> Self {
        Self { success: false, reason: Some(reason), actions: Vec::new(), private_messages: Vec::new() }
    }

    /// A rejection that still carries a private payload of its own (e.g.
    /// `BLOCKED`) instead of the generic `ACTION_REJECTED` the Host would
    /// otherwise synthesize from `reason`.
    pub fn reject_with_private(reason: RejectReason, private_messages: Vec<PrivateMessage>) -> Self {
        Self { success: false, reason: Some(reason), actions: Vec::new(), private_messages }
    }
}

pub(crate) fn caller_seat(state: &GameState, uid: &Uid) -> Option<Seat> {
    state
        .players
        .iter()
        .find_map(|(seat, player)| player.as_ref().filter(|p| &p.uid == uid).map(|_| *seat))
}

/// Dispatches one client intent to its handler. `rng_tie_break` is only
/// consulted by `ASSIGN_ROLES`, to decide the seer/mirrorSeer audio label
/// when both are present -- the Host draws it from `RandomPort` before
/// calling in, keeping this function itself a pure dispatcher.
pub fn handle_intent(
    intent: &Intent,
    ctx: &HandlerContext,
    state: &GameState,
    now: DateTime<Utc>,
    rng_tie_break: bool,
) -> HandlerOutput {
    if state.room_code != ctx.room_code {
        return HandlerOutput::reject(RejectReason::NoState);
    }

    match intent {
        Intent::TakeSeat { seat } => seating::handle_take_seat(ctx, state, *seat),
        Intent::LeaveSeat => seating::handle_leave_seat(ctx, state),
        Intent::ClearAllSeats => seating::handle_clear_all_seats(ctx, state),
        Intent::UpdateTemplate { roles } => lifecycle::handle_update_template(ctx, state, roles),
        Intent::AssignRoles => lifecycle::handle_assign_roles(ctx, state, rng_tie_break),
        Intent::StartNight => lifecycle::handle_start_night(ctx, state),
        Intent::MarkViewedRole => seating::handle_mark_viewed_role(ctx, state),
        Intent::SubmitAction { schema_id, target, targets, step_results } => {
            action::handle_submit_action(ctx, state, *schema_id, target, targets, step_results, now)
        }
        Intent::SubmitWolfVote { target } => action::handle_submit_wolf_vote(ctx, state, *target, now),
        Intent::SubmitRevealAck => action::handle_submit_reveal_ack(ctx, state),
        Intent::RequestSnapshot { request_id } => lifecycle::handle_request_snapshot(ctx, state, request_id),
        Intent::SetAudioPlaying { playing } => lifecycle::handle_set_audio_playing(ctx, state, *playing),
        Intent::EndNight => lifecycle::handle_end_night(ctx, state),
        Intent::RestartGame => lifecycle::handle_restart_game(ctx, state),
        Intent::ForceSync => lifecycle::handle_force_sync(ctx, state),
    }
}
