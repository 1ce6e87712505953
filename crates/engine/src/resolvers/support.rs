//! `guardProtect`, `witchAction`, `piperHypnotize`, `magicianSwap`, and
//! `dreamcatcherBind`.

use nightfall_domain::{ActionInput, RejectReason, Seat};

use super::{NightResultsPatch, ResolverContext, ResolverResult};

/// `guardProtect`: chooseSeat, may protect anyone including self; the
/// "reject if target equals yesterday's guardTarget" rule does not apply
/// on night one (there is no prior night), so any existing seat (or a
/// skip) is accepted.
pub fn resolve_guard_protect(ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    let target = match input {
        ActionInput::Seat(t) => *t,
        _ => return ResolverResult::reject(RejectReason::InvalidTarget),
    };
    if let Some(t) = target {
        if !ctx.seat_exists(t) {
            return ResolverResult::reject(RejectReason::InvalidTarget);
        }
    }
    let mut patch = NightResultsPatch::default();
    patch.guard_protect_target = Some(target);
    ResolverResult::ok(patch)
}

/// `witchAction` (compound `[save, poison]`). `save` is only acceptable
/// when the Host-supplied `witchContext.canSave` is true; `poison` rejects
/// a self target.
pub fn resolve_witch_action(ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    let steps = match input {
        ActionInput::Steps(s) => s,
        _ => return ResolverResult::reject(RejectReason::InvalidTarget),
    };

    let save_requested = steps.get("save").copied().flatten().is_some();
    let can_save = ctx.witch_context.map(|w| w.can_save).unwrap_or(false);
    if save_requested && !can_save {
        return ResolverResult::reject(RejectReason::ConstraintViolation);
    }

    let poison_target = steps.get("poison").copied().flatten();
    if let Some(t) = poison_target {
        if t == ctx.actor_seat {
            return ResolverResult::reject(RejectReason::ConstraintViolation);
        }
        if !ctx.seat_exists(t) {
            return ResolverResult::reject(RejectReason::InvalidTarget);
        }
    }

    let mut patch = NightResultsPatch::default();
    patch.witch_save = Some(save_requested);
    patch.witch_poison_target = Some(poison_target);
    ResolverResult::ok(patch)
}

/// `piperHypnotize`: 1-2 distinct non-self targets not already hypnotized;
/// empty selection is the `canSkip` path.
pub fn resolve_piper_hypnotize(ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    let targets = match input {
        ActionInput::Seats(t) => t,
        _ => return ResolverResult::reject(RejectReason::InvalidTarget),
    };

    if targets.len() > 2 {
        return ResolverResult::reject(RejectReason::ConstraintViolation);
    }

    let mut uniq = std::collections::HashSet::new();
    for &t in targets {
        if t == ctx.actor_seat || !ctx.seat_exists(t) {
            return ResolverResult::reject(RejectReason::ConstraintViolation);
        }
        if ctx.hypnotized_seats.contains(&t) {
            return ResolverResult::reject(RejectReason::InvalidTarget);
        }
        if !uniq.insert(t) {
            return ResolverResult::reject(RejectReason::ConstraintViolation);
        }
    }

    let mut patch = NightResultsPatch::default();
    patch.hypnotized_seats_merge = Some(targets.clone());
    ResolverResult::ok(patch)
}

/// `magicianSwap`: exactly two distinct non-self seats, or an empty
/// selection to skip.
pub fn resolve_magician_swap(ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    let targets = match input {
        ActionInput::Seats(t) => t,
        _ => return ResolverResult::reject(RejectReason::InvalidTarget),
    };

    if targets.is_empty() {
        return ResolverResult::ok(NightResultsPatch::default());
    }
    if targets.len() != 2 || targets[0] == targets[1] {
        return ResolverResult::reject(RejectReason::ConstraintViolation);
    }
    let (a, b): (Seat, Seat) = (targets[0], targets[1]);
    if a == ctx.actor_seat || b == ctx.actor_seat {
        return ResolverResult::reject(RejectReason::ConstraintViolation);
    }
    if !ctx.seat_exists(a) || !ctx.seat_exists(b) {
        return ResolverResult::reject(RejectReason::InvalidTarget);
    }

    let mut patch = NightResultsPatch::default();
    patch.swapped_pair = Some((a, b));
    ResolverResult::ok(patch)
}

/// `dreamcatcherBind`: chooseSeat, notSelf, may skip.
pub fn resolve_dreamcatcher_bind(ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    let target = match input {
        ActionInput::Seat(t) => *t,
        _ => return ResolverResult::reject(RejectReason::InvalidTarget),
    };
    if let Some(t) = target {
        if t == ctx.actor_seat || !ctx.seat_exists(t) {
            return ResolverResult::reject(RejectReason::ConstraintViolation);
        }
    }
    let mut patch = NightResultsPatch::default();
    patch.dream_bound_seat = Some(target);
    ResolverResult::ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn players() -> BTreeMap<Seat, nightfall_domain::RoleId> {
        BTreeMap::from([
            (0, nightfall_domain::RoleId::Piper),
            (1, nightfall_domain::RoleId::Villager),
            (2, nightfall_domain::RoleId::Villager),
            (3, nightfall_domain::RoleId::Wolf),
        ])
    }

    #[test]
    fn piper_merges_new_targets_with_existing() {
        let p = players();
        let results = nightfall_domain::CurrentNightResults::default();
        let hypnotized = [1u8];
        let c = ResolverContext {
            actor_seat: 0,
            actor_role: nightfall_domain::RoleId::Piper,
            players: &p,
            current_night_results: &results,
            hypnotized_seats: &hypnotized,
            witch_context: None,
            is_night1: true,
        };
        let res = resolve_piper_hypnotize(&c, &ActionInput::Seats(vec![2, 3]));
        assert!(res.valid);
        assert_eq!(res.patch.hypnotized_seats_merge, Some(vec![2, 3]));
    }

    #[test]
    fn piper_rejects_already_hypnotized_target() {
        let p = players();
        let results = nightfall_domain::CurrentNightResults::default();
        let hypnotized = [1u8];
        let c = ResolverContext {
            actor_seat: 0,
            actor_role: nightfall_domain::RoleId::Piper,
            players: &p,
            current_night_results: &results,
            hypnotized_seats: &hypnotized,
            witch_context: None,
            is_night1: true,
        };
        let res = resolve_piper_hypnotize(&c, &ActionInput::Seats(vec![1]));
        assert!(!res.valid);
        assert_eq!(res.reject_reason, Some(RejectReason::InvalidTarget));
    }

    #[test]
    fn witch_rejects_save_when_context_disallows() {
        let p = players();
        let results = nightfall_domain::CurrentNightResults::default();
        let witch_ctx = nightfall_domain::WitchContext {
            killed_seat: Some(1),
            can_save: false,
            can_poison: true,
        };
        let c = ResolverContext {
            actor_seat: 0,
            actor_role: nightfall_domain::RoleId::Witch,
            players: &p,
            current_night_results: &results,
            hypnotized_seats: &[],
            witch_context: Some(&witch_ctx),
            is_night1: true,
        };
        let mut steps = std::collections::BTreeMap::new();
        steps.insert("save".to_string(), Some(1));
        let res = resolve_witch_action(&c, &ActionInput::Steps(steps));
        assert!(!res.valid);
        assert_eq!(res.reject_reason, Some(RejectReason::ConstraintViolation));
    }
}
