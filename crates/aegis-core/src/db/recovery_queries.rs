//! Recovery record queries and plan-to-recovery synchronization.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    metrics,
    models::{EmergencyPlan, Milestone, RecoveryProgress, RecoveryStage, UpdateRecoveryRequest},
};

const SELECT_RECOVERY_BY_ID_SQL: &str = "SELECT id, business_id, crisis_event_id, recovery_stage, operational_capacity_percent, revenue_recovery_percent, milestones_completed, next_actions, created_at, updated_at FROM recovery_progress WHERE id = ?1";
const SELECT_RECOVERY_BY_CRISIS_SQL: &str = "SELECT id, business_id, crisis_event_id, recovery_stage, operational_capacity_percent, revenue_recovery_percent, milestones_completed, next_actions, created_at, updated_at FROM recovery_progress WHERE crisis_event_id = ?1";
const INSERT_RECOVERY_SQL: &str = "INSERT INTO recovery_progress (business_id, crisis_event_id, recovery_stage, operational_capacity_percent, revenue_recovery_percent, milestones_completed, next_actions, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const SYNC_RECOVERY_SQL: &str = "UPDATE recovery_progress SET operational_capacity_percent = ?1, next_actions = ?2, updated_at = ?3 WHERE id = ?4";
const UPDATE_RECOVERY_SQL: &str = "UPDATE recovery_progress SET recovery_stage = ?1, operational_capacity_percent = ?2, revenue_recovery_percent = ?3, milestones_completed = ?4, updated_at = ?5 WHERE id = ?6";

impl super::Database {
    /// Helper function to construct a RecoveryProgress from a database row
    fn build_recovery_from_row(row: &rusqlite::Row) -> rusqlite::Result<RecoveryProgress> {
        let stage_str: String = row.get(3)?;
        let recovery_stage = stage_str.parse::<RecoveryStage>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Text,
                format!("Invalid recovery stage: {stage_str}").into(),
            )
        })?;

        let milestones_json: String = row.get(6)?;
        let milestones_completed: Vec<Milestone> = serde_json::from_str(&milestones_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

        let next_actions_json: String = row.get(7)?;
        let next_actions: Vec<String> = serde_json::from_str(&next_actions_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

        Ok(RecoveryProgress {
            id: row.get::<_, i64>(0)? as u64,
            business_id: row.get::<_, i64>(1)? as u64,
            crisis_event_id: row.get::<_, i64>(2)? as u64,
            recovery_stage,
            operational_capacity_percent: row.get::<_, i64>(4)? as u8,
            revenue_recovery_percent: row.get::<_, i64>(5)? as u8,
            milestones_completed,
            next_actions,
            created_at: row.get::<_, String>(8)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(9)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Retrieves a recovery record by its ID.
    pub fn get_recovery(&self, recovery_id: u64) -> Result<Option<RecoveryProgress>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_RECOVERY_BY_ID_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        stmt.query_row(params![recovery_id as i64], Self::build_recovery_from_row)
            .optional()
            .db_context("Failed to get recovery record")
    }

    /// Retrieves the recovery record for a crisis event, if one exists.
    pub fn get_recovery_for_crisis(&self, crisis_id: u64) -> Result<Option<RecoveryProgress>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_RECOVERY_BY_CRISIS_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        stmt.query_row(params![crisis_id as i64], Self::build_recovery_from_row)
            .optional()
            .db_context("Failed to query recovery record for crisis")
    }

    /// Pushes a plan's derived metrics into the recovery record of its
    /// linked crisis.
    ///
    /// Returns `Ok(None)` when no crisis references the plan; that is the
    /// quiet no-op case, not an error. When a crisis exists but has no
    /// recovery record yet, one is created with the derived values and
    /// defaults everywhere else. An existing record keeps its stage,
    /// revenue figure, and milestone history; only the machine-derived
    /// capacity and next-actions fields are overwritten.
    pub fn sync_recovery_for_plan(&mut self, plan: &EmergencyPlan) -> Result<Option<RecoveryProgress>> {
        let Some(crisis) = self.get_crisis_for_plan(plan.id)? else {
            return Ok(None);
        };

        let capacity = metrics::operational_capacity(plan);
        let next_actions = metrics::next_actions(plan, metrics::NEXT_ACTIONS_LIMIT);
        let next_actions_json = serde_json::to_string(&next_actions)?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let existing_id: Option<i64> = tx
            .query_row(
                "SELECT id FROM recovery_progress WHERE crisis_event_id = ?1",
                params![crisis.id as i64],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to query recovery record")?;

        let recovery_id = match existing_id {
            Some(id) => {
                tx.execute(
                    SYNC_RECOVERY_SQL,
                    params![capacity as i64, &next_actions_json, &now_str, id],
                )
                .map_err(|e| TrackerError::database_error("Failed to sync recovery record", e))?;
                id
            }
            None => {
                tx.execute(
                    INSERT_RECOVERY_SQL,
                    params![
                        crisis.business_id as i64,
                        crisis.id as i64,
                        RecoveryStage::default().as_str(),
                        capacity as i64,
                        0i64,
                        "[]",
                        &next_actions_json,
                        &now_str,
                        &now_str
                    ],
                )
                .map_err(|e| TrackerError::database_error("Failed to insert recovery record", e))?;
                tx.last_insert_rowid()
            }
        };

        tx.commit().db_context("Failed to commit transaction")?;

        let record = self
            .get_recovery(recovery_id as u64)?
            .ok_or(TrackerError::RecoveryNotFound {
                id: recovery_id as u64,
            })?;
        Ok(Some(record))
    }

    /// Applies a direct, user-driven update to a recovery record.
    ///
    /// This path trusts the caller's figures and does not consult the
    /// Metrics Deriver; a capacity set here stands only until the next
    /// action toggle on the linked plan overwrites it. Milestones are
    /// append-only, stamped with the update time.
    pub fn update_recovery(
        &mut self,
        recovery_id: u64,
        request: &UpdateRecoveryRequest,
    ) -> Result<RecoveryProgress> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = {
            let mut stmt = tx
                .prepare(SELECT_RECOVERY_BY_ID_SQL)
                .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;
            stmt.query_row(params![recovery_id as i64], Self::build_recovery_from_row)
                .optional()
                .db_context("Failed to get recovery record")?
                .ok_or(TrackerError::RecoveryNotFound { id: recovery_id })?
        };

        let now = Timestamp::now();
        let now_str = now.to_string();

        let stage = request.recovery_stage.unwrap_or(current.recovery_stage);
        let capacity = request
            .operational_capacity_percent
            .unwrap_or(current.operational_capacity_percent);
        let revenue = request
            .revenue_recovery_percent
            .unwrap_or(current.revenue_recovery_percent);

        let mut milestones = current.milestones_completed.clone();
        if let Some(text) = &request.milestone {
            milestones.push(Milestone {
                text: text.clone(),
                completed_at: now,
            });
        }
        let milestones_json = serde_json::to_string(&milestones)?;

        tx.execute(
            UPDATE_RECOVERY_SQL,
            params![
                stage.as_str(),
                capacity as i64,
                revenue as i64,
                &milestones_json,
                &now_str,
                recovery_id as i64
            ],
        )
        .map_err(|e| TrackerError::database_error("Failed to update recovery record", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(RecoveryProgress {
            recovery_stage: stage,
            operational_capacity_percent: capacity,
            revenue_recovery_percent: revenue,
            milestones_completed: milestones,
            updated_at: now,
            ..current
        })
    }
}
