//! `confirm` schemas: hunter / dark-wolf-king / blood-moon readiness
//! acknowledgements. No target, no reject path beyond a malformed
//! input -- `canSkip = false` on these schemas just means "must submit",
//! which a `Confirm` input always satisfies.

use nightfall_domain::{ActionInput, RejectReason};

use super::{NightResultsPatch, ResolverContext, ResolverResult};

fn confirm(input: &ActionInput) -> ResolverResult {
    match input {
        ActionInput::Confirm => ResolverResult::ok(NightResultsPatch::default()),
        _ => ResolverResult::reject(RejectReason::InvalidTarget),
    }
}

pub fn resolve_hunter_confirm(_ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    confirm(input)
}

pub fn resolve_dark_wolf_king_confirm(_ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    confirm(input)
}

pub fn resolve_blood_moon_confirm(_ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    confirm(input)
}
