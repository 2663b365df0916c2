//! Crisis event operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::CrisisEvent,
    params::{Id, OpenCrisis},
};

impl Tracker {
    /// Opens a new crisis event for the requester's business.
    ///
    /// When a plan is linked, it must belong to the same business; the link
    /// is what later routes action toggles into this crisis's recovery
    /// record.
    pub async fn open_crisis(&self, params: &OpenCrisis, requester: &str) -> Result<CrisisEvent> {
        params.validate()?;

        let db_path = self.db_path.clone();
        let business_id = params.business_id;
        let crisis_type = params.crisis_type.clone();
        let description = params.description.clone();
        let emergency_plan_id = params.emergency_plan_id;
        let principal = requester.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let business = db.get_business_by_principal(&principal)?;
            if business.id != business_id {
                return Err(TrackerError::Forbidden {
                    resource: "business",
                    id: business_id,
                });
            }

            if let Some(plan_id) = emergency_plan_id {
                let plan = db
                    .get_plan(plan_id)?
                    .ok_or(TrackerError::PlanNotFound { id: plan_id })?;
                if plan.business_id != business_id {
                    return Err(TrackerError::Forbidden {
                        resource: "plan",
                        id: plan_id,
                    });
                }
            }

            db.create_crisis_event(
                business_id,
                &crisis_type,
                description.as_deref(),
                emergency_plan_id,
            )
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a crisis event by its ID.
    pub async fn get_crisis(&self, params: &Id) -> Result<Option<CrisisEvent>> {
        let db_path = self.db_path.clone();
        let crisis_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_crisis(crisis_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
