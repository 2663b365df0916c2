//! Crisis event queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::CrisisEvent,
};

const INSERT_CRISIS_SQL: &str = "INSERT INTO crisis_events (business_id, crisis_type, description, status, emergency_plan_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_CRISIS_BY_ID_SQL: &str = "SELECT id, business_id, crisis_type, description, status, emergency_plan_id, created_at, updated_at FROM crisis_events WHERE id = ?1";
const SELECT_CRISIS_BY_PLAN_SQL: &str = "SELECT id, business_id, crisis_type, description, status, emergency_plan_id, created_at, updated_at FROM crisis_events WHERE emergency_plan_id = ?1 ORDER BY created_at DESC LIMIT 1";

impl super::Database {
    /// Helper function to construct a CrisisEvent from a database row
    fn build_crisis_from_row(row: &rusqlite::Row) -> rusqlite::Result<CrisisEvent> {
        Ok(CrisisEvent {
            id: row.get::<_, i64>(0)? as u64,
            business_id: row.get::<_, i64>(1)? as u64,
            crisis_type: row.get(2)?,
            description: row.get(3)?,
            status: row.get(4)?,
            emergency_plan_id: row.get::<_, Option<i64>>(5)?.map(|id| id as u64),
            created_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(7)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Records a new crisis event, optionally linked to an activated plan.
    pub fn create_crisis_event(
        &mut self,
        business_id: u64,
        crisis_type: &str,
        description: Option<&str>,
        emergency_plan_id: Option<u64>,
    ) -> Result<CrisisEvent> {
        if let Some(plan_id) = emergency_plan_id {
            let plan_exists: bool = self
                .connection
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)",
                    params![plan_id as i64],
                    |row| row.get(0),
                )
                .map_err(|e| TrackerError::database_error("Failed to check plan existence", e))?;
            if !plan_exists {
                return Err(TrackerError::PlanNotFound { id: plan_id });
            }
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_CRISIS_SQL,
                params![
                    business_id as i64,
                    crisis_type,
                    description,
                    "active",
                    emergency_plan_id.map(|id| id as i64),
                    &now_str,
                    &now_str
                ],
            )
            .map_err(|e| TrackerError::database_error("Failed to insert crisis event", e))?;

        Ok(CrisisEvent {
            id: self.connection.last_insert_rowid() as u64,
            business_id,
            crisis_type: crisis_type.into(),
            description: description.map(String::from),
            status: "active".into(),
            emergency_plan_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a crisis event by its ID.
    pub fn get_crisis(&self, crisis_id: u64) -> Result<Option<CrisisEvent>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CRISIS_BY_ID_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        stmt.query_row(params![crisis_id as i64], Self::build_crisis_from_row)
            .optional()
            .db_context("Failed to get crisis event")
    }

    /// Finds the crisis event linked to a plan, if one exists.
    ///
    /// When several crises reference the same plan the most recently opened
    /// one wins; synchronization follows the live response.
    pub fn get_crisis_for_plan(&self, plan_id: u64) -> Result<Option<CrisisEvent>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CRISIS_BY_PLAN_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        stmt.query_row(params![plan_id as i64], Self::build_crisis_from_row)
            .optional()
            .db_context("Failed to query crisis event for plan")
    }
}
