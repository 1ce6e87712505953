//! Resolvers: one pure function per schema, each
//! `(ResolverContext, ActionInput) -> ResolverResult`. Resolvers validate
//! an action against a context and compute its outcome; they never check
//! the nightmare block (that is a handler guard), never
//! mutate global state, and never perform I/O.

mod checks;
mod confirms;
mod support;
mod wolf;

use std::collections::BTreeMap;

use nightfall_domain::{CurrentNightResults, PrivatePayload, RejectReason, Seat};

pub use checks::{resolve_gargoyle_check, resolve_psychic_check, resolve_pure_white_check, resolve_seer_check};
pub use confirms::{resolve_blood_moon_confirm, resolve_dark_wolf_king_confirm, resolve_hunter_confirm};
pub use support::{resolve_dreamcatcher_bind, resolve_guard_protect, resolve_magician_swap, resolve_piper_hypnotize, resolve_witch_action};
pub use wolf::{resolve_nightmare_block, resolve_wolf_kill, resolve_wolf_robot_learn, validate_wolf_vote};

/// Everything a resolver needs to know about the surrounding game, short of
/// touching `GameState` directly.
pub struct ResolverContext<'a> {
    pub actor_seat: Seat,
    pub actor_role: nightfall_domain::RoleId,
    pub players: &'a BTreeMap<Seat, nightfall_domain::RoleId>,
    pub current_night_results: &'a CurrentNightResults,
    pub hypnotized_seats: &'a [Seat],
    pub witch_context: Option<&'a nightfall_domain::WitchContext>,
    pub is_night1: bool,
}

impl<'a> ResolverContext<'a> {
    /// Faction lookup that follows any magician swaps recorded so far, so
    /// a seer/gargoyle/psychic check sees the post-swap identity.
    pub fn faction_at(&self, seat: Seat) -> Option<nightfall_domain::Faction> {
        let resolved = self.current_night_results.resolve_identity(seat);
        self.players
            .get(&resolved)
            .map(|role| crate::registry::get_role_spec(*role).faction)
    }

    pub fn seat_exists(&self, seat: Seat) -> bool {
        self.players.contains_key(&seat)
    }
}

/// A sparse set of field-level writes to fold into `currentNightResults`
/// (and the handful of `GameState` fields resolvers influence, like
/// `hypnotizedSeats`). Every field is `Option`; `None` means "resolver did
/// not touch this field" so the reducer's `APPLY_RESOLVER_RESULT` can merge
/// rather than overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NightResultsPatch {
    pub blocked_seat: Option<Option<Seat>>,
    pub guard_protect_target: Option<Option<Seat>>,
    pub witch_save: Option<bool>,
    pub witch_poison_target: Option<Option<Seat>>,
    pub dream_bound_seat: Option<Option<Seat>>,
    pub swapped_pair: Option<(Seat, Seat)>,
    pub hunter_seat_revealed_to_wolf_robot: Option<Option<Seat>>,
    pub hypnotized_seats_merge: Option<Vec<Seat>>,
    /// Set once the flow controller tallies a completed `wolfKill` round.
    /// `Some(None)` means the round resolved to an empty knife.
    pub wolf_kill: Option<Option<Seat>>,
}

impl NightResultsPatch {
    /// Folds this patch into `results` in place.
    pub fn apply_to(&self, results: &mut CurrentNightResults) {
        if let Some(v) = self.blocked_seat {
            results.blocked_seat = v;
        }
        if let Some(v) = self.guard_protect_target {
            results.guard_protect_target = v;
        }
        if let Some(v) = self.witch_save {
            results.witch_save = v;
        }
        if let Some(v) = self.witch_poison_target {
            results.witch_poison_target = v;
        }
        if let Some(v) = self.dream_bound_seat {
            results.dream_bound_seat = v;
        }
        if let Some(pair) = self.swapped_pair {
            results.swapped_pairs.push(pair);
        }
        if let Some(v) = self.hunter_seat_revealed_to_wolf_robot {
            results.hunter_seat_revealed_to_wolf_robot = v;
        }
        if let Some(target) = self.wolf_kill {
            results.wolf_kill_resolved = true;
            results.wolf_kill_target = target;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverResult {
    pub valid: bool,
    pub reject_reason: Option<RejectReason>,
    pub reveal: Option<PrivatePayload>,
    pub patch: NightResultsPatch,
}

impl ResolverResult {
    pub fn ok(patch: NightResultsPatch) -> Self {
        Self {
            valid: true,
            reject_reason: None,
            reveal: None,
            patch,
        }
    }

    pub fn ok_with_reveal(patch: NightResultsPatch, reveal: PrivatePayload) -> Self {
        Self {
            valid: true,
            reject_reason: None,
            reveal: Some(reveal),
            patch,
        }
    }

    pub fn reject(reason: RejectReason) -> Self {
        Self {
            valid: false,
            reject_reason: Some(reason),
            reveal: None,
            patch: NightResultsPatch::default(),
        }
    }
}

pub(crate) fn check_result_for(faction: nightfall_domain::Faction) -> nightfall_domain::CheckResult {
    match faction {
        nightfall_domain::Faction::Wolf => nightfall_domain::CheckResult::Wolf,
        _ => nightfall_domain::CheckResult::Good,
    }
}
