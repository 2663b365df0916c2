//! Plan operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{EmergencyPlan, PlanStatus},
    params::{CreatePlan, Id, ListPlans, SetPlanStatus},
};

/// Checks that the requester's business owns the given plan.
///
/// Resolution happens against the same database handle the caller is about
/// to mutate with, so the check and the mutation see one connection.
pub(super) fn authorize_plan(db: &Database, plan: &EmergencyPlan, principal: &str) -> Result<()> {
    let business = db.get_business_by_principal(principal)?;
    if business.id != plan.business_id {
        return Err(TrackerError::Forbidden {
            resource: "plan",
            id: plan.id,
        });
    }
    Ok(())
}

impl Tracker {
    /// Creates a new plan for the requester's business, optionally seeded
    /// with generated actions.
    pub async fn create_plan(&self, params: &CreatePlan, requester: &str) -> Result<EmergencyPlan> {
        params.validate()?;

        let db_path = self.db_path.clone();
        let request = params.clone();
        let principal = requester.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let business = db.get_business_by_principal(&principal)?;
            if business.id != request.business_id {
                return Err(TrackerError::Forbidden {
                    resource: "business",
                    id: request.business_id,
                });
            }
            db.create_plan(&request)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a plan with its full Action Ledger.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<EmergencyPlan>> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_plan(plan_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists plan summaries, hiding archived plans unless requested.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<crate::display::PlanSummaries> {
        let db_path = self.db_path.clone();
        let include_archived = params.archived;

        let summaries = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_plans(include_archived)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(crate::display::PlanSummaries(summaries))
    }

    /// Changes a plan's lifecycle status.
    pub async fn set_plan_status(
        &self,
        params: &SetPlanStatus,
        requester: &str,
    ) -> Result<EmergencyPlan> {
        let status = params.validate()?;

        let db_path = self.db_path.clone();
        let plan_id = params.id;
        let principal = requester.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let plan = db
                .get_plan(plan_id)?
                .ok_or(TrackerError::PlanNotFound { id: plan_id })?;
            authorize_plan(&db, &plan, &principal)?;
            db.set_plan_status(plan_id, status)?;
            db.get_plan(plan_id)?
                .ok_or(TrackerError::PlanNotFound { id: plan_id })
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Archives a plan, hiding it from the default listing.
    pub async fn archive_plan(&self, params: &Id, requester: &str) -> Result<EmergencyPlan> {
        let request = SetPlanStatus {
            id: params.id,
            status: PlanStatus::Archived.as_str().to_string(),
        };
        self.set_plan_status(&request, requester).await
    }
}
