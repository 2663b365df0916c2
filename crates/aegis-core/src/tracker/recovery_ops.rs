//! Recovery record operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    metrics::PlanMetrics,
    models::{RecoveryProgress, UpdateRecoveryRequest},
    params::{Id, UpdateRecovery},
};

impl Tracker {
    /// Retrieves a recovery record by its ID.
    pub async fn get_recovery(&self, params: &Id) -> Result<Option<RecoveryProgress>> {
        let db_path = self.db_path.clone();
        let recovery_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_recovery(recovery_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Applies a direct, user-driven update to a recovery record.
    ///
    /// Stage, revenue, and milestones entered here are authoritative; a
    /// capacity figure is not, since the next action toggle on the linked
    /// plan recomputes it from the Action Ledger.
    pub async fn update_recovery(
        &self,
        params: &UpdateRecovery,
        requester: &str,
    ) -> Result<RecoveryProgress> {
        let request = UpdateRecoveryRequest::try_from(params.clone())?;

        let db_path = self.db_path.clone();
        let recovery_id = params.id;
        let principal = requester.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let record = db
                .get_recovery(recovery_id)?
                .ok_or(TrackerError::RecoveryNotFound { id: recovery_id })?;

            let business = db.get_business_by_principal(&principal)?;
            if business.id != record.business_id {
                return Err(TrackerError::Forbidden {
                    resource: "recovery record",
                    id: recovery_id,
                });
            }

            if request.is_empty() {
                return Ok(record);
            }
            db.update_recovery(recovery_id, &request)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Derives the full metric set for a plan snapshot without touching any
    /// recovery record.
    pub async fn compute_metrics(&self, params: &Id) -> Result<PlanMetrics> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let plan = db
                .get_plan(plan_id)?
                .ok_or(TrackerError::PlanNotFound { id: plan_id })?;
            Ok(PlanMetrics::derive(&plan))
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
