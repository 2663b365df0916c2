//! Plan summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{EmergencyPlan, PlanStatus};
use crate::metrics;

/// Summary information about a plan with action statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// ID of the owning business
    pub business_id: u64,
    /// Name of the plan
    pub name: String,
    /// Kind of crisis the plan addresses
    pub crisis_type: Option<String>,
    /// Plan status
    pub status: PlanStatus,
    /// Author-set total cost estimate
    pub estimated_cost: Option<f64>,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of actions across all three phases
    pub total_actions: u32,
    /// Number of completed actions
    pub completed_actions: u32,
}

impl PlanSummary {
    /// Completion percentage over all phases, using the deriver's rounding.
    pub fn completion_percent(&self) -> u8 {
        metrics::percent_of(self.completed_actions, self.total_actions)
    }
}

impl From<&EmergencyPlan> for PlanSummary {
    fn from(plan: &EmergencyPlan) -> Self {
        let total_actions = plan.all_actions().count() as u32;
        let completed_actions = plan.all_actions().filter(|a| a.completed).count() as u32;

        Self {
            id: plan.id,
            business_id: plan.business_id,
            name: plan.name.clone(),
            crisis_type: plan.crisis_type.clone(),
            status: plan.status,
            estimated_cost: plan.estimated_cost,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
            total_actions,
            completed_actions,
        }
    }
}
