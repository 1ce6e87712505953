//! End-of-night death resolution: folds guard protection, witch
//! save/poison, and the resolved wolf-kill target into `lastNightDeaths`.
//! Spirit-knight reflection is recorded in `currentNightResults` but not
//! applied here -- its retaliation effect is a day-phase mechanic, out of
//! scope for this night-only core (decision recorded in DESIGN.md).

use std::collections::BTreeSet;

use nightfall_domain::{CurrentNightResults, Seat};

/// Computes the sorted, deduplicated set of seats that die overnight.
///
/// Order of operations: the wolves' resolved kill target dies unless the
/// guard protected that exact seat or the witch saved it; the witch's
/// poison target dies unconditionally (poison is not blockable by guard or
/// by the witch's own save).
pub fn resolve_last_night_deaths(results: &CurrentNightResults) -> Vec<Seat> {
    let mut deaths: BTreeSet<Seat> = BTreeSet::new();

    if let Some(killed) = results.wolf_kill_target {
        let protected = results.guard_protect_target == Some(killed);
        let saved = results.witch_save;
        if !protected && !saved {
            deaths.insert(killed);
        }
    }

    if let Some(poisoned) = results.witch_poison_target {
        deaths.insert(poisoned);
    }

    deaths.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> CurrentNightResults {
        CurrentNightResults::default()
    }

    #[test]
    fn minimal_kill_with_no_intervention() {
        let mut r = results();
        r.wolf_kill_resolved = true;
        r.wolf_kill_target = Some(1);
        assert_eq!(resolve_last_night_deaths(&r), vec![1]);
    }

    #[test]
    fn guard_protection_saves_the_target() {
        let mut r = results();
        r.wolf_kill_resolved = true;
        r.wolf_kill_target = Some(3);
        r.guard_protect_target = Some(3);
        assert!(resolve_last_night_deaths(&r).is_empty());
    }

    #[test]
    fn witch_save_protects_and_poison_adds_a_separate_death() {
        let mut r = results();
        r.wolf_kill_resolved = true;
        r.wolf_kill_target = Some(2);
        r.witch_save = true;
        r.witch_poison_target = Some(5);
        assert_eq!(resolve_last_night_deaths(&r), vec![5]);
    }

    #[test]
    fn empty_knife_with_poison_only_kills_the_poison_target() {
        let mut r = results();
        r.wolf_kill_resolved = true;
        r.wolf_kill_target = None;
        r.witch_poison_target = Some(4);
        assert_eq!(resolve_last_night_deaths(&r), vec![4]);
    }
}
