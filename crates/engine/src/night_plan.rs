//! Night plan builder: pure function from a role multiset to an ordered
//! list of night steps.

use nightfall_domain::{NightPlan, NightPlanStep, RoleId};

use crate::registry::get_role_spec;

/// Builds the night-one plan for a seated template.
///
/// `RoleId` is a closed enum validated at the wire boundary (`Intent`
/// deserialization), so there is no `InvalidRoleIds` failure mode left
/// once the value reaches this function -- every `RoleId` the type
/// system hands us already resolves in the registry. Filters to roles
/// with a `night1` action, deduplicates by role, and sorts by ascending
/// `order` with a lexicographic wire-name tie-break for determinism.
pub fn build_night_plan(roles: &[RoleId]) -> NightPlan {
    let mut seen = std::collections::HashSet::new();
    let mut steps: Vec<NightPlanStep> = roles
        .iter()
        .copied()
        .filter(|role| seen.insert(*role))
        .filter_map(|role| {
            let spec = get_role_spec(role);
            spec.night1.map(|n1| NightPlanStep {
                role_id: role,
                schema_id: n1.schema_id,
                order: n1.order,
                acts_solo: n1.acts_solo,
            })
        })
        .collect();

    steps.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.role_id.wire_name().cmp(b.role_id.wire_name()))
    });

    NightPlan { steps }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_plan() {
        assert!(build_night_plan(&[]).is_empty());
    }

    #[test]
    fn all_villagers_yields_empty_plan() {
        let roles = vec![RoleId::Villager; 4];
        assert!(build_night_plan(&roles).is_empty());
    }

    #[test]
    fn duplicate_wolves_collapse_to_one_step() {
        let roles = vec![RoleId::Wolf, RoleId::Wolf, RoleId::WolfQueen, RoleId::Villager];
        let plan = build_night_plan(&roles);
        // Wolf and WolfQueen share the wolfKill schema but are distinct
        // RoleIds, so the no-duplicate-roleIds invariant allows both to
        // appear; only the repeated plain Wolf collapses.
        assert_eq!(plan.steps.iter().filter(|s| s.role_id == RoleId::Wolf).count(), 1);
        assert!(plan.has_no_duplicate_roles());
    }

    #[test]
    fn steps_are_sorted_ascending_by_order() {
        let roles = vec![
            RoleId::Hunter,
            RoleId::Nightmare,
            RoleId::Wolf,
            RoleId::Seer,
            RoleId::Witch,
            RoleId::Guard,
        ];
        let plan = build_night_plan(&roles);
        assert!(plan.is_sorted_by_order());
        assert_eq!(plan.steps.first().unwrap().role_id, RoleId::Nightmare);
        assert_eq!(plan.steps.last().unwrap().role_id, RoleId::Hunter);
    }

    #[test]
    fn is_pure_function_of_the_multiset_order_independent() {
        let a = vec![RoleId::Wolf, RoleId::Seer, RoleId::Witch];
        let b = vec![RoleId::Witch, RoleId::Wolf, RoleId::Seer];
        assert_eq!(build_night_plan(&a), build_night_plan(&b));
    }
}
