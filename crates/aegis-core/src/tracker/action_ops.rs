//! Action Ledger operations for the Tracker.
//!
//! Mutations here follow a fixed sequence: authorize against the requester's
//! business, commit the ledger change, then push the plan's derived metrics
//! into the recovery record of any linked crisis. The ledger commit is never
//! rolled back by a synchronization failure; sync is retried once and then
//! reported as [`TrackerError::SyncFailed`] with the mutation intact.

use tokio::task;

use super::plan_ops::authorize_plan;
use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{EmergencyPlan, PlanAction, RecoveryProgress},
    params::{AddAction, RemoveAction, ToggleAction},
};

/// Pushes derived metrics to the linked recovery record, retrying once.
///
/// A second failure maps to SyncFailed carrying the plan id; by then the
/// ledger mutation has already committed, and the error text says so.
fn sync_with_retry(db: &mut Database, plan: &EmergencyPlan) -> Result<Option<RecoveryProgress>> {
    match db.sync_recovery_for_plan(plan) {
        Ok(record) => Ok(record),
        Err(_) => db
            .sync_recovery_for_plan(plan)
            .map_err(|e| TrackerError::SyncFailed {
                plan_id: plan.id,
                message: e.to_string(),
            }),
    }
}

impl Tracker {
    /// Sets the completion flag of one action and synchronizes the linked
    /// recovery record.
    ///
    /// The action is addressed by (phase, index) against the phase's display
    /// order; the database resolves that address to a stable row id inside
    /// the mutating transaction. Returns the refreshed plan.
    pub async fn toggle_action(
        &self,
        params: &ToggleAction,
        requester: &str,
    ) -> Result<EmergencyPlan> {
        let phase = params.validate()?;

        let db_path = self.db_path.clone();
        let plan_id = params.plan_id;
        let index = params.index;
        let completed = params.completed;
        let principal = requester.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let plan = db
                .get_plan(plan_id)?
                .ok_or(TrackerError::PlanNotFound { id: plan_id })?;
            authorize_plan(&db, &plan, &principal)?;

            let plan = db.set_action_completion(plan_id, phase, index, completed)?;
            sync_with_retry(&mut db, &plan)?;
            Ok(plan)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Appends a new action to one phase of a plan and synchronizes the
    /// linked recovery record, whose next-actions cache may now differ.
    pub async fn add_action(&self, params: &AddAction, requester: &str) -> Result<PlanAction> {
        let (phase, priority) = params.validate()?;

        let db_path = self.db_path.clone();
        let plan_id = params.plan_id;
        let description = params.description.clone();
        let estimated_cost = params.estimated_cost;
        let time_required = params.time_required.clone();
        let responsible_party = params.responsible_party.clone();
        let principal = requester.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let plan = db
                .get_plan(plan_id)?
                .ok_or(TrackerError::PlanNotFound { id: plan_id })?;
            authorize_plan(&db, &plan, &principal)?;

            let action = db.add_action(
                plan_id,
                phase,
                &description,
                priority,
                estimated_cost,
                time_required.as_deref(),
                responsible_party.as_deref(),
            )?;

            let plan = db
                .get_plan(plan_id)?
                .ok_or(TrackerError::PlanNotFound { id: plan_id })?;
            sync_with_retry(&mut db, &plan)?;
            Ok(action)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Removes the action at the given index and synchronizes the linked
    /// recovery record.
    pub async fn remove_action(&self, params: &RemoveAction, requester: &str) -> Result<()> {
        let phase = params.validate()?;

        let db_path = self.db_path.clone();
        let plan_id = params.plan_id;
        let index = params.index;
        let principal = requester.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let plan = db
                .get_plan(plan_id)?
                .ok_or(TrackerError::PlanNotFound { id: plan_id })?;
            authorize_plan(&db, &plan, &principal)?;

            db.remove_action(plan_id, phase, index)?;

            let plan = db
                .get_plan(plan_id)?
                .ok_or(TrackerError::PlanNotFound { id: plan_id })?;
            sync_with_retry(&mut db, &plan)?;
            Ok(())
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
