//! Wolf-side resolvers: `nightmareBlock`, `wolfKill` (first-vote tally),
//! and `wolfRobotLearn`.

use nightfall_domain::{ActionInput, PrivatePayload, RejectReason, RoleId, Seat};

use super::{NightResultsPatch, ResolverContext, ResolverResult};

/// `nightmareBlock`: chooseSeat, notSelf, may skip. Writes
/// `currentNightResults.blockedSeat`.
pub fn resolve_nightmare_block(ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
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
    patch.blocked_seat = Some(target);
    ResolverResult::ok(patch)
}

/// Validates a single wolf's `SUBMIT_WOLF_VOTE` before the handler records
/// it. `target = None` is accepted iff `allowEmptyVote` (always true for
/// `wolfKill`, per the registry).
pub fn validate_wolf_vote(ctx: &ResolverContext<'_>, target: Option<Seat>) -> Result<(), RejectReason> {
    match target {
        None => Ok(()),
        Some(t) if t == ctx.actor_seat => Err(RejectReason::ConstraintViolation),
        Some(t) if !ctx.seat_exists(t) => Err(RejectReason::InvalidTarget),
        Some(_) => Ok(()),
    }
}

/// Resolves the wolves' kill target from the round's votes in submission
/// order (first-vote-wins tie-break, decision recorded in DESIGN.md).
/// `None` means an empty knife. Votes after the first for the eventual
/// winning target do not
/// change the outcome; a tie among distinct targets is broken by whichever
/// target was voted for earliest.
pub fn resolve_wolf_kill(votes_in_order: &[(Seat, Option<Seat>)]) -> Option<Seat> {
    let mut counts: Vec<(Seat, usize, usize)> = Vec::new(); // (target, count, first_index)
    for (index, (_voter, target)) in votes_in_order.iter().enumerate() {
        let Some(target) = target else { continue };
        if let Some(entry) = counts.iter_mut().find(|(t, _, _)| t == target) {
            entry.1 += 1;
        } else {
            counts.push((*target, 1, index));
        }
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.2.cmp(&a.2)))
        .map(|(target, _, _)| target)
}

/// `wolfRobotLearn`: a `confirm` schema -- the robot does not choose a
/// seat, it learns whichever seat holds the Hunter role, if any is seated
/// this game. Downstream `canShootAsHunter` gating is out of scope for
/// the night-only core (decision recorded in DESIGN.md).
pub fn resolve_wolf_robot_learn(ctx: &ResolverContext<'_>, input: &ActionInput) -> ResolverResult {
    match input {
        ActionInput::Confirm => {}
        _ => return ResolverResult::reject(RejectReason::InvalidTarget),
    }
    let hunter_seat = ctx
        .players
        .iter()
        .find(|(_, role)| **role == RoleId::Hunter)
        .map(|(seat, _)| *seat);

    match hunter_seat {
        Some(seat) => ResolverResult::ok_with_reveal(
            NightResultsPatch::default(),
            PrivatePayload::WolfRobotReveal {
                target_seat: seat,
                is_hunter: true,
            },
        ),
        None => ResolverResult::ok_with_reveal(
            NightResultsPatch::default(),
            PrivatePayload::WolfRobotReveal {
                target_seat: ctx.actor_seat,
                is_hunter: false,
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_vote_wins_a_tie() {
        // wolf seat 0 votes target 5 first, wolf seat 2 votes target 7
        // second; both end up with one vote each -- seat 5 was first.
        let votes = [(0u8, Some(5u8)), (2, Some(7))];
        assert_eq!(resolve_wolf_kill(&votes), Some(5));
    }

    #[test]
    fn majority_target_wins_over_a_single_vote() {
        let votes = [(0u8, Some(5u8)), (1, Some(7)), (2, Some(5))];
        assert_eq!(resolve_wolf_kill(&votes), Some(5));
    }

    #[test]
    fn all_empty_votes_yield_no_kill() {
        let votes: [(u8, Option<u8>); 2] = [(0, None), (1, None)];
        assert_eq!(resolve_wolf_kill(&votes), None);
    }

    #[test]
    fn single_vote_resolves_directly() {
        let votes = [(0u8, Some(1u8))];
        assert_eq!(resolve_wolf_kill(&votes), Some(1));
    }

    #[test]
    fn missed_deadline_vote_does_not_block_first_voter() {
        // wolf 0 voted target 5; wolf 1 missed the deadline (counted empty
        // by the flow controller, not here).
        let votes = [(0u8, Some(5u8)), (1, None)];
        assert_eq!(resolve_wolf_kill(&votes), Some(5));
    }
}
