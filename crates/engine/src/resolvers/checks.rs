//! `chooseSeat` schemas that look up a target's faction and emit a reveal:
//! seer, psychic, gargoyle, and pure-white.

use nightfall_domain::{ActionInput, PrivatePayload, RejectReason};

use super::{check_result_for, NightResultsPatch, ResolverContext, ResolverResult};

fn faction_reveal(
    ctx: &ResolverContext<'_>,
    input: &ActionInput,
    can_skip: bool,
    wrap: impl Fn(nightfall_domain::Seat, nightfall_domain::CheckResult) -> PrivatePayload,
) -> ResolverResult {
    let target = match input {
        ActionInput::Seat(t) => *t,
        _ => return ResolverResult::reject(RejectReason::InvalidTarget),
    };

    let target = match target {
        None if can_skip => return ResolverResult::ok(NightResultsPatch::default()),
        None => return ResolverResult::reject(RejectReason::CanSkipViolation),
        Some(t) => t,
    };

    if target == ctx.actor_seat {
        return ResolverResult::reject(RejectReason::ConstraintViolation);
    }
    if !ctx.seat_exists(target) {
        return ResolverResult::reject(RejectReason::InvalidTarget);
    }

    let Some(faction) = ctx.faction_at(target) else {
        return ResolverResult::reject(RejectReason::InvalidTarget);
    };

    let result = check_result_for(faction);
    ResolverResult::ok_with_reveal(NightResultsPatch::default(), wrap(target, result))
}

/// `seerCheck`: reject self or nonexistent target; `canSkip = false`
/// per the registry, so a null target is rejected outright.
pub fn resolve_seer_check(ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    faction_reveal(ctx, input, false, |target_seat, result| {
        PrivatePayload::SeerReveal { target_seat, result }
    })
}

pub fn resolve_psychic_check(ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    faction_reveal(ctx, input, false, |target_seat, result| {
        PrivatePayload::PsychicReveal { target_seat, result }
    })
}

pub fn resolve_gargoyle_check(ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    faction_reveal(ctx, input, false, |target_seat, result| {
        PrivatePayload::GargoyleReveal { target_seat, result }
    })
}

/// `pureWhiteCheck` reveals the role itself (the whole point of the faction
/// for Pure White is staying hidden until voted out; the night-one reveal
/// is the role identity, not a wolf/good faction call, per its schema UI's
/// `PureWhiteReveal` kind).
pub fn resolve_pure_white_check(ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    let target = match input {
        ActionInput::Seat(t) => *t,
        _ => return ResolverResult::reject(RejectReason::InvalidTarget),
    };
    let Some(target) = target else {
        return ResolverResult::reject(RejectReason::CanSkipViolation);
    };
    if target == ctx.actor_seat || !ctx.seat_exists(target) {
        return ResolverResult::reject(RejectReason::ConstraintViolation);
    }
    let resolved = ctx.current_night_results.resolve_identity(target);
    let Some(role) = ctx.players.get(&resolved).copied() else {
        return ResolverResult::reject(RejectReason::InvalidTarget);
    };
    ResolverResult::ok_with_reveal(NightResultsPatch::default(), PrivatePayload::PureWhiteReveal { role })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn ctx(players: BTreeMap<u8, nightfall_domain::RoleId>) -> (BTreeMap<u8, nightfall_domain::RoleId>, nightfall_domain::CurrentNightResults) {
        (players, nightfall_domain::CurrentNightResults::default())
    }

    #[test]
    fn seer_rejects_self_target() {
        let (players, results) = ctx(BTreeMap::from([(0, nightfall_domain::RoleId::Seer)]));
        let c = ResolverContext {
            actor_seat: 0,
            actor_role: nightfall_domain::RoleId::Seer,
            players: &players,
            current_night_results: &results,
            hypnotized_seats: &[],
            witch_context: None,
            is_night1: true,
        };
        let res = resolve_seer_check(&c, &ActionInput::Seat(Some(0)));
        assert!(!res.valid);
        assert_eq!(res.reject_reason, Some(RejectReason::ConstraintViolation));
    }

    #[test]
    fn seer_rejects_skip_because_can_skip_false() {
        let (players, results) = ctx(BTreeMap::from([(0, nightfall_domain::RoleId::Seer), (1, nightfall_domain::RoleId::Wolf)]));
        let c = ResolverContext {
            actor_seat: 0,
            actor_role: nightfall_domain::RoleId::Seer,
            players: &players,
            current_night_results: &results,
            hypnotized_seats: &[],
            witch_context: None,
            is_night1: true,
        };
        let res = resolve_seer_check(&c, &ActionInput::Seat(None));
        assert!(!res.valid);
        assert_eq!(res.reject_reason, Some(RejectReason::CanSkipViolation));
    }

    #[test]
    fn seer_reveals_wolf_faction() {
        let (players, results) = ctx(BTreeMap::from([(0, nightfall_domain::RoleId::Seer), (1, nightfall_domain::RoleId::Wolf)]));
        let c = ResolverContext {
            actor_seat: 0,
            actor_role: nightfall_domain::RoleId::Seer,
            players: &players,
            current_night_results: &results,
            hypnotized_seats: &[],
            witch_context: None,
            is_night1: true,
        };
        let res = resolve_seer_check(&c, &ActionInput::Seat(Some(1)));
        assert!(res.valid);
        assert_eq!(
            res.reveal,
            Some(PrivatePayload::SeerReveal { target_seat: 1, result: nightfall_domain::CheckResult::Wolf })
        );
    }

    #[test]
    fn seer_sees_post_swap_identity() {
        let (players, mut results) = ctx(BTreeMap::from([
            (0, nightfall_domain::RoleId::Seer),
            (1, nightfall_domain::RoleId::Villager),
            (2, nightfall_domain::RoleId::Wolf),
        ]));
        results.swapped_pairs.push((1, 2));
        let c = ResolverContext {
            actor_seat: 0,
            actor_role: nightfall_domain::RoleId::Seer,
            players: &players,
            current_night_results: &results,
            hypnotized_seats: &[],
            witch_context: None,
            is_night1: true,
        };
        let res = resolve_seer_check(&c, &ActionInput::Seat(Some(1)));
        assert_eq!(
            res.reveal,
            Some(PrivatePayload::SeerReveal { target_seat: 1, result: nightfall_domain::CheckResult::Wolf })
        );
    }
}
