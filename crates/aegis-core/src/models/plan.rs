//! Emergency plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Phase, PlanAction, PlanStatus};

/// Represents a complete emergency plan with its three phase sequences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmergencyPlan {
    /// Unique identifier for the plan
    pub id: u64,

    /// ID of the owning business
    pub business_id: u64,

    /// Name of the plan
    pub name: String,

    /// Kind of crisis the plan addresses ("flood", "power outage", ...)
    pub crisis_type: Option<String>,

    /// Lifecycle status of the plan
    #[serde(default)]
    pub status: PlanStatus,

    /// Author-set total cost estimate, independent of derived metrics
    pub estimated_cost: Option<f64>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    /// Actions to take before the crisis hits, in display order
    #[serde(default)]
    pub pre_crisis_actions: Vec<PlanAction>,

    /// Actions for the active response, in display order
    #[serde(default)]
    pub during_crisis_actions: Vec<PlanAction>,

    /// Recovery actions after the crisis, in display order
    #[serde(default)]
    pub post_crisis_actions: Vec<PlanAction>,
}

impl EmergencyPlan {
    /// The action sequence for a given phase.
    pub fn actions(&self, phase: Phase) -> &[PlanAction] {
        match phase {
            Phase::Pre => &self.pre_crisis_actions,
            Phase::During => &self.during_crisis_actions,
            Phase::Post => &self.post_crisis_actions,
        }
    }

    /// Iterator over all actions across the three phases.
    pub fn all_actions(&self) -> impl Iterator<Item = &PlanAction> {
        self.pre_crisis_actions
            .iter()
            .chain(self.during_crisis_actions.iter())
            .chain(self.post_crisis_actions.iter())
    }
}
