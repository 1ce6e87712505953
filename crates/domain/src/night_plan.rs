//! Night plan shape. Construction lives in `nightfall-engine`'s night plan
//! builder; this module only carries the data and its structural
//! invariants so other crates can depend on it without pulling in the
//! builder.

use serde::{Deserialize, Serialize};

use crate::role::RoleId;
use crate::schema::SchemaId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightPlanStep {
    pub role_id: RoleId,
    pub schema_id: SchemaId,
    pub order: i32,
    pub acts_solo: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightPlan {
    pub steps: Vec<NightPlanStep>,
}

impl NightPlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn step_at(&self, index: usize) -> Option<&NightPlanStep> {
        self.steps.get(index)
    }

    /// Steps are sorted by ascending order.
    pub fn is_sorted_by_order(&self) -> bool {
        self.steps.windows(2).all(|w| w[0].order <= w[1].order)
    }

    /// No duplicate roleIds.
    pub fn has_no_duplicate_roles(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.steps.iter().all(|s| seen.insert(s.role_id))
    }
}
