//! Pure derivation of recovery metrics from a plan's Action Ledger.
//!
//! Every function here is a deterministic function of an [`EmergencyPlan`]
//! snapshot: no I/O, no hidden state, same input gives same output. The
//! tracker calls these during synchronization; dashboards call them through
//! [`crate::tracker::Tracker::compute_metrics`].

use serde::{Deserialize, Serialize};

use crate::models::EmergencyPlan;

/// Default number of outstanding actions surfaced by [`next_actions`].
pub const NEXT_ACTIONS_LIMIT: usize = 5;

/// Weight of during-crisis and post-crisis actions in the capacity estimate.
const ACTIVE_PHASE_WEIGHT: u32 = 2;
/// Weight of pre-crisis actions in the capacity estimate.
const PRE_PHASE_WEIGHT: u32 = 1;

/// The full set of derived metrics for a plan snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanMetrics {
    /// Unweighted completion percentage over all phases
    pub completion_percent: u8,
    /// Weighted operating-capacity estimate
    pub operational_capacity_percent: u8,
    /// Prioritized outstanding-action descriptions
    pub next_actions: Vec<String>,
}

impl PlanMetrics {
    /// Derive all metrics from a plan snapshot.
    pub fn derive(plan: &EmergencyPlan) -> Self {
        Self {
            completion_percent: completion_percent(plan),
            operational_capacity_percent: operational_capacity(plan),
            next_actions: next_actions(plan, NEXT_ACTIONS_LIMIT),
        }
    }
}

/// Round-half-up percentage of `part` in `total`; 0 when `total` is 0.
pub fn percent_of(part: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    // Integer round-half-up, matching the UI's Math.round for non-negative
    // ratios.
    ((200 * part + total) / (2 * total)) as u8
}

/// Completion percentage over the concatenation of all three phases.
///
/// Phase order does not affect the result. An empty ledger yields 0.
pub fn completion_percent(plan: &EmergencyPlan) -> u8 {
    let total = plan.all_actions().count() as u32;
    let completed = plan.all_actions().filter(|a| a.completed).count() as u32;
    percent_of(completed, total)
}

/// Weighted operating-capacity estimate.
///
/// During- and post-crisis actions count double the weight of pre-crisis
/// actions: preparation contributes less to *current* capacity than
/// in-crisis and recovery execution. The result is capped at 100; with
/// correct weights the cap cannot trigger, but it stays as an invariant
/// guard against weighting mistakes.
pub fn operational_capacity(plan: &EmergencyPlan) -> u8 {
    let count = |actions: &[crate::models::PlanAction]| {
        let total = actions.len() as u32;
        let completed = actions.iter().filter(|a| a.completed).count() as u32;
        (total, completed)
    };

    let (during_total, during_done) = count(&plan.during_crisis_actions);
    let (post_total, post_done) = count(&plan.post_crisis_actions);
    let (pre_total, pre_done) = count(&plan.pre_crisis_actions);

    let total_weight = ACTIVE_PHASE_WEIGHT * (during_total + post_total) + PRE_PHASE_WEIGHT * pre_total;
    if total_weight == 0 {
        return 0;
    }
    let completed_weight =
        ACTIVE_PHASE_WEIGHT * (during_done + post_done) + PRE_PHASE_WEIGHT * pre_done;

    percent_of(completed_weight, total_weight).min(100)
}

/// Prioritized descriptions of outstanding actions, at most `limit`.
///
/// Candidates are taken during -> post -> pre; that concatenation order is
/// the tie-break between equal priorities, so the sort must stay stable.
/// Completed actions are excluded. A missing priority would rank as low,
/// but [`crate::models::Priority`] defaults to medium at deserialization,
/// matching the stored data.
pub fn next_actions(plan: &EmergencyPlan, limit: usize) -> Vec<String> {
    let mut outstanding: Vec<_> = plan
        .during_crisis_actions
        .iter()
        .chain(plan.post_crisis_actions.iter())
        .chain(plan.pre_crisis_actions.iter())
        .filter(|a| !a.completed)
        .collect();

    outstanding.sort_by_key(|a| a.priority.rank());

    outstanding
        .into_iter()
        .take(limit)
        .map(|a| a.description.clone())
        .collect()
}
