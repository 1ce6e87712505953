//! `SUBMIT_ACTION`, `SUBMIT_WOLF_VOTE`, and `SUBMIT_REVEAL_ACK`:
//! the universal guards (actor seated and alive, role matches schema, the
//! schema is the actor's current step, and the nightmare block) live here,
//! ahead of the per-schema resolver dispatch.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use nightfall_domain::{
    ActionInput, BlockedReason, GameState, PrivatePayload, RejectReason, RoleId, RoomStatus, Seat,
    SchemaId,
};
use nightfall_engine_ports::HandlerContext;

use super::{caller_seat, HandlerOutput};
use crate::broadcast::private_message;
use crate::reducer::ReducerAction;
use crate::registry::{get_role_spec, get_schema};
use crate::resolvers::{self, ResolverContext, ResolverResult};

fn players_map(state: &GameState) -> BTreeMap<Seat, RoleId> {
    state
        .players
        .iter()
        .filter_map(|(seat, player)| Some((*seat, player.as_ref()?.role?)))
        .collect()
}

/// Whether an `ActionInput` is a skip/empty submission -- the only shape a
/// nightmare-blocked actor is still allowed to act with. `Confirm` carries
/// no target to block, so it is never subject to the nightmare guard.
fn is_skip_input(input: &ActionInput) -> bool {
    match input {
        ActionInput::Seat(seat) => seat.is_none(),
        ActionInput::Seats(seats) => seats.is_empty(),
        ActionInput::Steps(steps) => steps.values().all(Option::is_none),
        ActionInput::Confirm => true,
    }
}

fn dispatch_resolver(schema_id: SchemaId, ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    match schema_id {
        SchemaId::NightmareBlock => resolvers::resolve_nightmare_block(ctx, input),
        SchemaId::GuardProtect => resolvers::resolve_guard_protect(ctx, input),
        SchemaId::WitchAction => resolvers::resolve_witch_action(ctx, input),
        SchemaId::SeerCheck => resolvers::resolve_seer_check(ctx, input),
        SchemaId::PsychicCheck => resolvers::resolve_psychic_check(ctx, input),
        SchemaId::PiperHypnotize => resolvers::resolve_piper_hypnotize(ctx, input),
        SchemaId::MagicianSwap => resolvers::resolve_magician_swap(ctx, input),
        SchemaId::GargoyleCheck => resolvers::resolve_gargoyle_check(ctx, input),
        SchemaId::WolfRobotLearn => resolvers::resolve_wolf_robot_learn(ctx, input),
        SchemaId::DreamcatcherBind => resolvers::resolve_dreamcatcher_bind(ctx, input),
        SchemaId::PureWhiteCheck => resolvers::resolve_pure_white_check(ctx, input),
        SchemaId::HunterConfirm => resolvers::resolve_hunter_confirm(ctx, input),
        SchemaId::DarkWolfKingConfirm => resolvers::resolve_dark_wolf_king_confirm(ctx, input),
        SchemaId::BloodMoonConfirm => resolvers::resolve_blood_moon_confirm(ctx, input),
        SchemaId::WolfKill => ResolverResult::reject(RejectReason::UnknownSchema),
    }
}

pub fn handle_submit_action(
    ctx: &HandlerContext,
    state: &GameState,
    schema_id: SchemaId,
    target: &Option<Seat>,
    targets: &Option<Vec<Seat>>,
    step_results: &Option<BTreeMap<String, Option<Seat>>>,
    now: DateTime<Utc>,
) -> HandlerOutput {
    if state.status != RoomStatus::Ongoing {
        return HandlerOutput::reject(RejectReason::GameInProgress);
    }
    if schema_id == SchemaId::WolfKill {
        return HandlerOutput::reject(RejectReason::UnknownSchema);
    }
    let Some(actor_seat) = caller_seat(state, &ctx.caller_uid) else {
        return HandlerOutput::reject(RejectReason::InvalidTarget);
    };
    let Some(actor_role) = state.players.get(&actor_seat).and_then(|p| p.as_ref()).and_then(|p| p.role) else {
        return HandlerOutput::reject(RejectReason::UnknownRole);
    };
    let Some(night1) = get_role_spec(actor_role).night1 else {
        return HandlerOutput::reject(RejectReason::NotInRole);
    };
    if night1.schema_id != schema_id {
        return HandlerOutput::reject(RejectReason::NotInRole);
    }
    if state.current_step_id != Some(schema_id) {
        return HandlerOutput::reject(RejectReason::NotYourTurn);
    }
    let Some(step) = state.current_step_index.and_then(|i| state.night_plan.step_at(i)) else {
        return HandlerOutput::reject(RejectReason::NotYourTurn);
    };
    if step.role_id != actor_role {
        return HandlerOutput::reject(RejectReason::NotYourTurn);
    }

    let input = match get_schema(schema_id) {
        Ok(schema) => match schema.kind {
            nightfall_domain::ActionSchemaKind::ChooseSeat { .. } => ActionInput::Seat(*target),
            nightfall_domain::ActionSchemaKind::ChooseMultipleSeats { .. } => {
                ActionInput::Seats(targets.clone().unwrap_or_default())
            }
            nightfall_domain::ActionSchemaKind::Compound { .. } => {
                ActionInput::Steps(step_results.clone().unwrap_or_default())
            }
            nightfall_domain::ActionSchemaKind::Confirm { .. } => ActionInput::Confirm,
            nightfall_domain::ActionSchemaKind::WolfVote { .. } => return HandlerOutput::reject(RejectReason::UnknownSchema),
        },
        Err(_) => return HandlerOutput::reject(RejectReason::UnknownSchema),
    };

    let blocked = state.current_night_results.blocked_seat == Some(actor_seat);
    if blocked && !is_skip_input(&input) {
        let private_messages = vec![private_message(
            ctx.caller_uid.clone(),
            state.revision,
            PrivatePayload::Blocked { reason: BlockedReason::Nightmare },
        )];
        return HandlerOutput::reject_with_private(RejectReason::BlockedByNightmare, private_messages);
    }

    let players = players_map(state);
    let mut actions = vec![ReducerAction::RecordAction {
        seat: actor_seat,
        schema_id,
        input: input.clone(),
        at: now,
    }];

    let resolver_ctx = ResolverContext {
        actor_seat,
        actor_role,
        players: &players,
        current_night_results: &state.current_night_results,
        hypnotized_seats: &state.hypnotized_seats,
        witch_context: state.witch_context.as_ref(),
        is_night1: true,
    };

    let result = dispatch_resolver(schema_id, &resolver_ctx, &input);
    if !result.valid {
        return HandlerOutput::reject(result.reject_reason.unwrap_or(RejectReason::ConstraintViolation));
    }

    actions.push(ReducerAction::ApplyResolverResult { patch: result.patch });

    let has_reveal_kind = get_schema(schema_id).map(|s| s.ui.reveal_kind.is_some()).unwrap_or(false);
    let mut private_messages = Vec::new();
    if let Some(reveal) = result.reveal {
        private_messages.push(private_message(ctx.caller_uid.clone(), state.revision, reveal));
        if has_reveal_kind {
            actions.push(ReducerAction::SetPendingRevealAck { to_uid: ctx.caller_uid.clone() });
        }
    }

    HandlerOutput::ok_with_private(actions, private_messages)
}

pub fn handle_submit_wolf_vote(ctx: &HandlerContext, state: &GameState, target: Option<Seat>, now: DateTime<Utc>) -> HandlerOutput {
    if state.status != RoomStatus::Ongoing {
        return HandlerOutput::reject(RejectReason::GameInProgress);
    }
    if state.current_step_id != Some(SchemaId::WolfKill) {
        return HandlerOutput::reject(RejectReason::NotYourTurn);
    }
    let Some(actor_seat) = caller_seat(state, &ctx.caller_uid) else {
        return HandlerOutput::reject(RejectReason::InvalidTarget);
    };
    let Some(actor_role) = state.players.get(&actor_seat).and_then(|p| p.as_ref()).and_then(|p| p.role) else {
        return HandlerOutput::reject(RejectReason::UnknownRole);
    };
    if !get_role_spec(actor_role).participates_in_wolf_vote {
        return HandlerOutput::reject(RejectReason::NotInRole);
    }
    if state.wolf_votes_by_seat.contains_key(&actor_seat) {
        return HandlerOutput::reject(RejectReason::DuplicateVote);
    }

    let blocked = state.current_night_results.blocked_seat == Some(actor_seat);
    if blocked && target.is_some() {
        let private_messages = vec![private_message(
            ctx.caller_uid.clone(),
            state.revision,
            PrivatePayload::Blocked { reason: BlockedReason::Nightmare },
        )];
        return HandlerOutput::reject_with_private(RejectReason::BlockedByNightmare, private_messages);
    }

    let players = players_map(state);
    let resolver_ctx = ResolverContext {
        actor_seat,
        actor_role,
        players: &players,
        current_night_results: &state.current_night_results,
        hypnotized_seats: &state.hypnotized_seats,
        witch_context: state.witch_context.as_ref(),
        is_night1: true,
    };
    if let Err(reason) = resolvers::validate_wolf_vote(&resolver_ctx, target) {
        return HandlerOutput::reject(reason);
    }

    let actions = vec![
        ReducerAction::RecordWolfVote { seat: actor_seat, target },
        ReducerAction::RecordAction {
            seat: actor_seat,
            schema_id: SchemaId::WolfKill,
            input: ActionInput::Seat(target),
            at: now,
        },
    ];

    HandlerOutput::ok(actions)
}

pub fn handle_submit_reveal_ack(ctx: &HandlerContext, state: &GameState) -> HandlerOutput {
    let Some(ack) = state.pending_reveal_acks.iter().find(|a| a.to_uid == ctx.caller_uid) else {
        return HandlerOutput::reject(RejectReason::InvalidTarget);
    };
    HandlerOutput::ok(vec![ReducerAction::ClearRevealAck { to_uid: ctx.caller_uid.clone(), revision: ack.revision }])
}
