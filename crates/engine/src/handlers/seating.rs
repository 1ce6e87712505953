//! Seating & lobby handlers: `TAKE_SEAT`, `LEAVE_SEAT`, `CLEAR_ALL_SEATS`,
//! `MARK_VIEWED_ROLE`.

use nightfall_domain::{RejectReason, RoomStatus, Seat};
use nightfall_engine_ports::HandlerContext;

use super::{caller_seat, HandlerOutput};
use crate::reducer::ReducerAction;

pub fn handle_take_seat(ctx: &HandlerContext, state: &nightfall_domain::GameState, seat: Seat) -> HandlerOutput {
    if !matches!(state.status, RoomStatus::Unseated | RoomStatus::Seated) {
        return HandlerOutput::reject(RejectReason::GameInProgress);
    }
    if !state.players.contains_key(&seat) {
        return HandlerOutput::reject(RejectReason::InvalidTarget);
    }
    if state.players.get(&seat).is_some_and(|p| p.is_some()) {
        return HandlerOutput::reject(RejectReason::InvalidTarget);
    }
    if caller_seat(state, &ctx.caller_uid).is_some() {
        return HandlerOutput::reject(RejectReason::ConstraintViolation);
    }
    HandlerOutput::ok(vec![ReducerAction::PlayerJoin { seat, uid: ctx.caller_uid.clone() }])
}

pub fn handle_leave_seat(ctx: &HandlerContext, state: &nightfall_domain::GameState) -> HandlerOutput {
    if matches!(state.status, RoomStatus::Ongoing) {
        return HandlerOutput::reject(RejectReason::GameInProgress);
    }
    let Some(seat) = caller_seat(state, &ctx.caller_uid) else {
        return HandlerOutput::reject(RejectReason::InvalidTarget);
    };
    HandlerOutput::ok(vec![ReducerAction::PlayerLeave { seat }])
}

pub fn handle_clear_all_seats(ctx: &HandlerContext, state: &nightfall_domain::GameState) -> HandlerOutput {
    if !ctx.is_host {
        return HandlerOutput::reject(RejectReason::HostOnly);
    }
    if !matches!(state.status, RoomStatus::Unseated | RoomStatus::Seated) {
        return HandlerOutput::reject(RejectReason::GameInProgress);
    }
    let actions = state
        .players
        .iter()
        .filter(|(_, p)| p.is_some())
        .map(|(seat, _)| ReducerAction::PlayerLeave { seat: *seat })
        .collect();
    HandlerOutput::ok(actions)
}

pub fn handle_mark_viewed_role(ctx: &HandlerContext, state: &nightfall_domain::GameState) -> HandlerOutput {
    if state.status != RoomStatus::Assigned {
        return HandlerOutput::reject(RejectReason::GameInProgress);
    }
    let Some(seat) = caller_seat(state, &ctx.caller_uid) else {
        return HandlerOutput::reject(RejectReason::InvalidTarget);
    };
    HandlerOutput::ok(vec![ReducerAction::MarkViewedRole { seat }])
}
