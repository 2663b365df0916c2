//! Business operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::Business,
    params::CreateBusiness,
};

impl Tracker {
    /// Registers a new business for a principal.
    pub async fn create_business(&self, params: &CreateBusiness) -> Result<Business> {
        params.validate()?;

        let db_path = self.db_path.clone();
        let principal = params.principal.clone();
        let name = params.name.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_business(&principal, &name)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Looks up the business registered for a principal.
    pub async fn get_business(&self, principal: &str) -> Result<Business> {
        let db_path = self.db_path.clone();
        let principal = principal.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_business_by_principal(&principal)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
