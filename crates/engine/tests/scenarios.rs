//! End-to-end scenarios driven through the crate's public, synchronous
//! surface (`handlers::handle_intent`, `reducer::apply_all`,
//! `flow::run_inline_progression`, `broadcast::to_broadcast`) rather than
//! through `Host`, since `Host` is the only async, I/O-bound piece and
//! these scenarios only exercise the pure core.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};

use nightfall_domain::{
    BlockedReason, GameState, Player, PrivatePayload, RejectReason, RoleId, RoomCode, RoomStatus,
    SchemaId,
};
use nightfall_engine::broadcast::to_broadcast;
use nightfall_engine::flow::run_inline_progression;
use nightfall_engine::handlers::{handle_intent, HandlerOutput};
use nightfall_engine::reducer::apply_all;
use nightfall_engine::{build_night_plan, ReducerAction};
use nightfall_engine_ports::HandlerContext;
use nightfall_protocol::Intent;

fn room(seat_count: u8, code: u16) -> GameState {
    GameState::new(RoomCode::new(code).unwrap(), "host".into(), seat_count)
}

fn seat(state: &mut GameState, seat_no: u8, role: RoleId) {
    state.players.insert(
        seat_no,
        Some({
            let mut p = Player::new(format!("u{seat_no}"), seat_no);
            p.role = Some(role);
            p.has_viewed_role = true;
            p
        }),
    );
}

fn start_night(mut state: GameState, roles: Vec<RoleId>) -> GameState {
    state.template_roles = roles.clone();
    state.night_plan = build_night_plan(&roles);
    state.status = RoomStatus::Ongoing;
    state.current_step_index = if state.night_plan.is_empty() { None } else { Some(0) };
    state.current_step_id = state.night_plan.step_at(0).map(|s| s.schema_id);
    state
}

/// Mirrors `Host::handle`'s dispatch-then-fold sequence without the ports:
/// bump the revision only when the handler actually produced actions.
fn submit(state: GameState, intent: Intent, uid: &str, is_host: bool) -> (GameState, HandlerOutput) {
    let ctx = HandlerContext::new(state.room_code, uid.to_string(), is_host);
    let now = Utc::now();
    let output = handle_intent(&intent, &ctx, &state, now, true);
    if !output.success || output.actions.is_empty() {
        return (state, output);
    }
    let mut next = apply_all(state, output.actions.clone());
    next.revision += 1;
    (next, output)
}

/// Mirrors `Host::run_progression`: drains one round of inline progression.
fn progress(state: GameState) -> (GameState, nightfall_engine::flow::ProgressionOutcome) {
    let now = Utc::now();
    let outcome = run_inline_progression(&state, now);
    if outcome.actions.is_empty() {
        return (state, outcome);
    }
    let mut next = apply_all(state, outcome.actions.clone());
    next.revision += 1;
    (next, outcome)
}

/// Submits an intent that must succeed, then drains progression, returning
/// the resulting state. For the happy-path steps of a scenario.
fn act(state: GameState, intent: Intent, uid: &str) -> GameState {
    let (state, output) = submit(state, intent, uid, false);
    assert!(output.success, "expected intent to succeed, got {:?}", output.reason);
    let (state, _) = progress(state);
    state
}

fn submit_action(schema_id: SchemaId, target: Option<u8>, targets: Option<Vec<u8>>, step_results: Option<BTreeMap<String, Option<u8>>>) -> Intent {
    Intent::SubmitAction { schema_id, target, targets, step_results }
}

/// S1: two players, wolf kills the sole villager, the night ends in one
/// inline progression pass.
#[test]
fn s1_two_player_minimal_end_of_night() {
    let mut state = room(2, 1001);
    seat(&mut state, 0, RoleId::Wolf);
    seat(&mut state, 1, RoleId::Villager);
    let state = start_night(state, vec![RoleId::Wolf, RoleId::Villager]);

    let (state, output) = submit(state, Intent::SubmitWolfVote { target: Some(1) }, "u0", false);
    assert!(output.success);

    let (state, outcome) = progress(state);
    assert_eq!(outcome.steps_advanced, 1);
    assert_eq!(outcome.audio_effects.len(), 2);
    assert!(outcome.audio_effects[0].key.contains("wolf"));
    assert!(outcome.audio_effects[1].is_end_audio);

    assert_eq!(state.status, RoomStatus::Ended);
    assert_eq!(state.last_night_deaths, vec![1]);
}

/// S2: the nightmare blocks the seer's seat; the seer's non-skip check is
/// rejected with `blocked_by_nightmare` and a private `BLOCKED`, and never
/// produces a `SeerReveal`.
#[test]
fn s2_nightmare_blocks_seer_non_skip_action() {
    let mut state = room(6, 1002);
    seat(&mut state, 0, RoleId::Wolf);
    seat(&mut state, 1, RoleId::Wolf);
    seat(&mut state, 2, RoleId::Nightmare);
    seat(&mut state, 3, RoleId::Seer);
    seat(&mut state, 4, RoleId::Witch);
    seat(&mut state, 5, RoleId::Villager);
    let state = start_night(
        state,
        vec![RoleId::Wolf, RoleId::Wolf, RoleId::Nightmare, RoleId::Seer, RoleId::Witch, RoleId::Villager],
    );
    assert_eq!(state.current_step_id, Some(SchemaId::NightmareBlock));

    let state = act(state, submit_action(SchemaId::NightmareBlock, Some(3), None, None), "u2");
    assert_eq!(state.current_step_id, Some(SchemaId::WolfKill));
    assert_eq!(state.current_night_results.blocked_seat, Some(3));

    let (state, output) = submit(state, Intent::SubmitWolfVote { target: Some(5) }, "u0", false);
    assert!(output.success);
    let (state, _) = progress(state);
    assert_eq!(state.current_step_id, Some(SchemaId::WolfKill), "still waiting on the second wolf");

    let state = act(state, Intent::SubmitWolfVote { target: Some(5) }, "u1");
    assert_eq!(state.current_step_id, Some(SchemaId::WitchAction));

    let state = act(state, submit_action(SchemaId::WitchAction, None, None, Some(BTreeMap::new())), "u4");
    assert_eq!(state.current_step_id, Some(SchemaId::SeerCheck));

    let (state, output) = submit(state, submit_action(SchemaId::SeerCheck, Some(0), None, None), "u3", false);
    assert!(!output.success);
    assert_eq!(output.reason, Some(RejectReason::BlockedByNightmare));
    assert!(output.actions.is_empty());
    assert_eq!(output.private_messages.len(), 1);
    assert_eq!(output.private_messages[0].to_uid, "u3");
    assert_eq!(
        output.private_messages[0].payload,
        PrivatePayload::Blocked { reason: BlockedReason::Nightmare }
    );

    // The rejection never touched state: still parked on seerCheck, no reveal recorded.
    assert_eq!(state.current_step_id, Some(SchemaId::SeerCheck));
    assert!(state.actions.iter().all(|a| a.schema_id != SchemaId::SeerCheck));
}

/// S3: the piper's hypnotized set only ever grows, and a seat already
/// hypnotized cannot be targeted again.
#[test]
fn s3_piper_hypnotize_is_cumulative() {
    let mut state = room(6, 1003);
    seat(&mut state, 0, RoleId::Villager);
    seat(&mut state, 1, RoleId::Villager);
    seat(&mut state, 2, RoleId::Piper);
    seat(&mut state, 3, RoleId::Villager);
    seat(&mut state, 4, RoleId::Villager);
    seat(&mut state, 5, RoleId::Villager);
    let mut state = start_night(
        state,
        vec![RoleId::Villager, RoleId::Villager, RoleId::Piper, RoleId::Villager, RoleId::Villager, RoleId::Villager],
    );
    state.hypnotized_seats = vec![1];
    assert_eq!(state.current_step_id, Some(SchemaId::PiperHypnotize));

    let (state, output) = submit(state, submit_action(SchemaId::PiperHypnotize, None, Some(vec![0, 3]), None), "u2", false);
    assert!(output.success, "{:?}", output.reason);
    assert_eq!(state.hypnotized_seats, vec![0, 1, 3]);

    let (_state, output) = submit(state, submit_action(SchemaId::PiperHypnotize, None, Some(vec![0]), None), "u2", false);
    assert!(!output.success);
    assert_eq!(output.reason, Some(RejectReason::InvalidTarget));
}

/// S4: a wolf meeting with an elapsed deadline resolves on the votes cast
/// so far, treating the missing wolf as an empty vote.
#[test]
fn s4_wolf_vote_deadline_resolves_with_missing_vote() {
    let mut state = room(3, 1004);
    seat(&mut state, 0, RoleId::Wolf);
    seat(&mut state, 1, RoleId::WolfQueen);
    seat(&mut state, 2, RoleId::Villager);
    let state = start_night(state, vec![RoleId::Wolf, RoleId::WolfQueen, RoleId::Villager]);

    let (mut state, output) = submit(state, Intent::SubmitWolfVote { target: Some(2) }, "u0", false);
    assert!(output.success);
    // seat 1 never votes; the deadline elapses instead.
    state.wolf_vote_deadline = Some(Utc::now() - Duration::milliseconds(1000));

    let (state, outcome) = progress(state);
    assert!(outcome.steps_advanced >= 1);
    assert_eq!(state.status, RoomStatus::Ended);
    assert_eq!(state.last_night_deaths, vec![2]);
}

/// S5: a private reveal only ever addresses the caller's own uid, never
/// the host, and the matching public broadcast discloses nothing about it.
#[test]
fn s5_private_reveal_is_scoped_to_the_caller_and_hidden_from_broadcast() {
    let mut state = room(4, 1005);
    seat(&mut state, 0, RoleId::Villager);
    seat(&mut state, 1, RoleId::Villager);
    seat(&mut state, 2, RoleId::Wolf);
    seat(&mut state, 3, RoleId::Seer);
    let state = start_night(state, vec![RoleId::Villager, RoleId::Villager, RoleId::Wolf, RoleId::Seer]);
    assert_eq!(state.current_step_id, Some(SchemaId::WolfKill));

    let state = act(state, Intent::SubmitWolfVote { target: None }, "u2");
    assert_eq!(state.current_step_id, Some(SchemaId::SeerCheck));

    let (state, output) = submit(state, submit_action(SchemaId::SeerCheck, Some(2), None, None), "u3", false);
    assert!(output.success);
    assert_eq!(output.private_messages.len(), 1);
    let message = &output.private_messages[0];
    assert_eq!(message.to_uid, "u3");
    assert_ne!(message.to_uid, state.host_uid);
    assert_eq!(
        message.payload,
        PrivatePayload::SeerReveal { target_seat: 2, result: nightfall_domain::CheckResult::Wolf }
    );

    let broadcast = to_broadcast(&state);
    let json = serde_json::to_string(&broadcast).expect("broadcast always serializes");
    assert!(!json.to_lowercase().contains("seerreveal"));
    assert!(!json.contains("\"result\""));
    assert_eq!(broadcast.players.get(&3).unwrap().as_ref().unwrap().role, None);
}

/// S6: `REQUEST_SNAPSHOT` answers with a private snapshot at the room's
/// current revision, carrying the caller's own role, and never mutates
/// state or bumps the revision on its own.
#[test]
fn s6_reconnect_snapshot_echoes_request_id_and_current_revision() {
    let mut state = room(2, 1006);
    seat(&mut state, 0, RoleId::Seer);
    seat(&mut state, 1, RoleId::Villager);
    state.revision = 12;

    let (state, output) = submit(state, Intent::RequestSnapshot { request_id: "r1".into() }, "u0", false);
    assert!(output.success);
    assert!(output.actions.is_empty());
    assert_eq!(state.revision, 12, "a snapshot request never bumps the revision");
    assert_eq!(output.private_messages.len(), 1);

    match &output.private_messages[0].payload {
        PrivatePayload::Snapshot { request_id, full_state, own_role } => {
            assert_eq!(request_id.as_deref(), Some("r1"));
            assert_eq!(full_state.revision, 12);
            assert_eq!(*own_role, Some(RoleId::Seer));
        }
        other => panic!("expected a Snapshot payload, got {other:?}"),
    }
    assert_eq!(output.private_messages[0].revision, 12);
}

/// P1: the public broadcast's top-level key set matches the published
/// whitelist exactly -- neither a missing field nor a field that slipped
/// in from `GameState`.
#[test]
fn broadcast_top_level_key_set_matches_the_whitelist() {
    let mut state = room(2, 1007);
    seat(&mut state, 0, RoleId::Seer);
    seat(&mut state, 1, RoleId::Wolf);
    let state = start_night(state, vec![RoleId::Seer, RoleId::Wolf]);

    let broadcast = to_broadcast(&state);
    let value = serde_json::to_value(&broadcast).expect("broadcast always serializes");
    let mut keys: Vec<String> = value.as_object().expect("object").keys().cloned().collect();
    keys.sort_unstable();

    let mut expected: Vec<String> = [
        "room_code",
        "host_uid",
        "status",
        "template_roles",
        "players",
        "current_step_index",
        "current_step_id",
        "is_audio_playing",
        "wolf_vote_status",
        "wolf_vote_deadline",
        "seer_label_map",
        "last_night_deaths",
        "revision",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    expected.sort_unstable();

    assert_eq!(keys, expected);
}

/// A fatal reducer action (exercised directly, since inline progression
/// only ever reaches it on a corrupted plan) ends the room rather than
/// panicking, matching the `unwrap`-free rewrite of the progression loop.
#[test]
fn fatal_error_action_ends_the_room_without_panicking() {
    let state = room(1, 1008);
    let state = apply_all(state, vec![ReducerAction::FatalError { reason: "test".into() }]);
    assert_eq!(state.status, RoomStatus::Ended);
    assert_eq!(state.fatal_error.as_deref(), Some("test"));
}
