//! Room-lifecycle handlers: template, role assignment, night start/end,
//! restart, and the snapshot/resync pair.

use std::collections::BTreeMap;

use nightfall_domain::{GameState, PrivatePayload, RejectReason, RoleId, RoomStatus, Seat};
use nightfall_engine_ports::HandlerContext;

use super::{caller_seat, HandlerOutput};
use crate::broadcast::{private_message, to_broadcast};
use crate::death::resolve_last_night_deaths;
use crate::reducer::ReducerAction;

pub fn handle_update_template(ctx: &HandlerContext, state: &GameState, roles: &[RoleId]) -> HandlerOutput {
    if !ctx.is_host {
        return HandlerOutput::reject(RejectReason::HostOnly);
    }
    if !matches!(state.status, RoomStatus::Unseated | RoomStatus::Seated) {
        return HandlerOutput::reject(RejectReason::GameInProgress);
    }
    if roles.len() != state.players.len() {
        return HandlerOutput::reject(RejectReason::ConstraintViolation);
    }
    HandlerOutput::ok(vec![ReducerAction::SetTemplate { roles: roles.to_vec() }])
}

/// Assigns `templateRoles[i]` to seat `i` in seat order (a direct index
/// mapping; decision recorded in DESIGN.md). `rng_tie_break` -- drawn by
/// the Host from `RandomPort`, never computed here -- only matters when
/// both Seer and MirrorSeer are in the same game, deciding which one is
/// labelled `1` for the shared seer audio cue.
pub fn handle_assign_roles(ctx: &HandlerContext, state: &GameState, rng_tie_break: bool) -> HandlerOutput {
    if !ctx.is_host {
        return HandlerOutput::reject(RejectReason::HostOnly);
    }
    if state.status != RoomStatus::Seated {
        return HandlerOutput::reject(RejectReason::GameInProgress);
    }
    if !state.all_seats_filled() {
        return HandlerOutput::reject(RejectReason::ConstraintViolation);
    }
    if state.template_roles.len() != state.players.len() {
        return HandlerOutput::reject(RejectReason::ConstraintViolation);
    }

    let roles_by_seat: BTreeMap<Seat, RoleId> = state
        .players
        .keys()
        .copied()
        .zip(state.template_roles.iter().copied())
        .collect();

    let seer_label_map = build_seer_label_map(&roles_by_seat, rng_tie_break);

    let private_messages = roles_by_seat
        .iter()
        .filter_map(|(seat, role)| {
            let uid = state.players.get(seat)?.as_ref()?.uid.clone();
            Some(private_message(uid, state.revision, PrivatePayload::RoleAssigned { role: *role }))
        })
        .collect();

    HandlerOutput::ok_with_private(
        vec![ReducerAction::AssignRoles { roles_by_seat, seer_label_map }],
        private_messages,
    )
}

fn build_seer_label_map(roles_by_seat: &BTreeMap<Seat, RoleId>, rng_tie_break: bool) -> BTreeMap<RoleId, u8> {
    let has_seer = roles_by_seat.values().any(|r| *r == RoleId::Seer);
    let has_mirror = roles_by_seat.values().any(|r| *r == RoleId::MirrorSeer);
    let mut map = BTreeMap::new();
    match (has_seer, has_mirror) {
        (true, true) => {
            let (first, second) = if rng_tie_break {
                (RoleId::Seer, RoleId::MirrorSeer)
            } else {
                (RoleId::MirrorSeer, RoleId::Seer)
            };
            map.insert(first, 1);
            map.insert(second, 2);
        }
        (true, false) => {
            map.insert(RoleId::Seer, 1);
        }
        (false, true) => {
            map.insert(RoleId::MirrorSeer, 1);
        }
        (false, false) => {}
    }
    map
}

pub fn handle_start_night(ctx: &HandlerContext, state: &GameState) -> HandlerOutput {
    if !ctx.is_host {
        return HandlerOutput::reject(RejectReason::HostOnly);
    }
    if state.status != RoomStatus::Assigned {
        return HandlerOutput::reject(RejectReason::GameInProgress);
    }
    if !state.all_viewed_role() {
        return HandlerOutput::reject(RejectReason::ConstraintViolation);
    }
    HandlerOutput::ok(vec![ReducerAction::StartNight])
}

pub fn handle_request_snapshot(ctx: &HandlerContext, state: &GameState, request_id: &str) -> HandlerOutput {
    HandlerOutput::ok(Vec::new()).with_snapshot(ctx, state, Some(request_id.to_string()))
}

pub fn handle_force_sync(ctx: &HandlerContext, state: &GameState) -> HandlerOutput {
    HandlerOutput::ok(Vec::new()).with_snapshot(ctx, state, None)
}

impl HandlerOutput {
    fn with_snapshot(mut self, ctx: &HandlerContext, state: &GameState, request_id: Option<String>) -> Self {
        let own_role = caller_seat(state, &ctx.caller_uid)
            .and_then(|seat| state.players.get(&seat))
            .and_then(|p| p.as_ref())
            .and_then(|p| p.role);
        self.private_messages.push(private_message(
            ctx.caller_uid.clone(),
            state.revision,
            PrivatePayload::Snapshot {
                request_id,
                full_state: Box::new(to_broadcast(state)),
                own_role,
            },
        ));
        self
    }
}

pub fn handle_set_audio_playing(ctx: &HandlerContext, state: &GameState, playing: bool) -> HandlerOutput {
    if !ctx.is_host {
        return HandlerOutput::reject(RejectReason::HostOnly);
    }
    if state.status != RoomStatus::Ongoing {
        return HandlerOutput::reject(RejectReason::GameInProgress);
    }
    HandlerOutput::ok(vec![ReducerAction::SetAudioPlaying { playing }])
}

pub fn handle_end_night(ctx: &HandlerContext, state: &GameState) -> HandlerOutput {
    if !ctx.is_host {
        return HandlerOutput::reject(RejectReason::HostOnly);
    }
    if state.status != RoomStatus::Ongoing {
        return HandlerOutput::reject(RejectReason::GameInProgress);
    }
    let deaths = resolve_last_night_deaths(&state.current_night_results);
    HandlerOutput::ok(vec![ReducerAction::EndNight { deaths }])
}

pub fn handle_restart_game(ctx: &HandlerContext, _state: &GameState) -> HandlerOutput {
    if !ctx.is_host {
        return HandlerOutput::reject(RejectReason::HostOnly);
    }
    HandlerOutput::ok(vec![ReducerAction::Restart])
}
