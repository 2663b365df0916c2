//! Action Ledger queries: append, remove, and completion toggles.
//!
//! Every mutation here resolves the addressed action to its stable row id
//! inside the same transaction that mutates it, so a (phase, index) address
//! can never land on a different action than the one it resolved to.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Phase, PlanAction, Priority},
};

const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const GET_NEXT_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), -1) + 1 FROM actions WHERE plan_id = ?1 AND phase = ?2";
const INSERT_ACTION_SQL: &str = "INSERT INTO actions (plan_id, phase, description, priority, estimated_cost, time_required, responsible_party, completed, position, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const SELECT_ACTION_AT_INDEX_SQL: &str = "SELECT id FROM actions WHERE plan_id = ?1 AND phase = ?2 ORDER BY position LIMIT 1 OFFSET ?3";
const COUNT_PHASE_ACTIONS_SQL: &str =
    "SELECT COUNT(*) FROM actions WHERE plan_id = ?1 AND phase = ?2";
const UPDATE_ACTION_COMPLETED_SQL: &str =
    "UPDATE actions SET completed = ?1, updated_at = ?2 WHERE id = ?3";
const SELECT_ACTION_POSITION_SQL: &str = "SELECT position FROM actions WHERE id = ?1";
const DELETE_ACTION_SQL: &str = "DELETE FROM actions WHERE id = ?1";
const COMPACT_POSITIONS_SQL: &str =
    "UPDATE actions SET position = position - 1 WHERE plan_id = ?1 AND phase = ?2 AND position > ?3";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Helper function to construct a PlanAction from a database row
    pub(super) fn build_action_from_row(row: &rusqlite::Row) -> rusqlite::Result<PlanAction> {
        let phase_str: String = row.get(2)?;
        let phase = phase_str.parse::<Phase>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                Type::Text,
                format!("Invalid phase: {phase_str}").into(),
            )
        })?;

        let priority_str: String = row.get(4)?;
        let priority = priority_str.parse::<Priority>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Text,
                format!("Invalid priority: {priority_str}").into(),
            )
        })?;

        Ok(PlanAction {
            id: row.get::<_, i64>(0)? as u64,
            plan_id: row.get::<_, i64>(1)? as u64,
            phase,
            description: row.get(3)?,
            priority,
            estimated_cost: row.get(5)?,
            time_required: row.get(6)?,
            responsible_party: row.get(7)?,
            completed: row.get(8)?,
            position: row.get::<_, i64>(9)? as u32,
            created_at: row.get::<_, String>(10)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e))
            })?,
            updated_at: row
                .get::<_, String>(11)?
                .parse::<Timestamp>()
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e))
                })?,
        })
    }

    /// Appends a new action to one phase of a plan.
    #[allow(clippy::too_many_arguments)]
    pub fn add_action(
        &mut self,
        plan_id: u64,
        phase: Phase,
        description: &str,
        priority: Priority,
        estimated_cost: Option<f64>,
        time_required: Option<&str>,
        responsible_party: Option<&str>,
    ) -> Result<PlanAction> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        // Check if plan exists
        let plan_exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| TrackerError::database_error("Failed to check plan existence", e))?;

        if !plan_exists {
            return Err(TrackerError::PlanNotFound { id: plan_id });
        }

        let position: i64 = tx
            .query_row(
                GET_NEXT_POSITION_SQL,
                params![plan_id as i64, phase.as_str()],
                |row| row.get(0),
            )
            .map_err(|e| TrackerError::database_error("Failed to get next position", e))?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_ACTION_SQL,
            params![
                plan_id as i64,
                phase.as_str(),
                description,
                priority.as_str(),
                estimated_cost,
                time_required,
                responsible_party,
                false,
                position,
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| TrackerError::database_error("Failed to insert action", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(UPDATE_PLAN_TIMESTAMP_SQL, params![&now_str, plan_id as i64])
            .map_err(|e| TrackerError::database_error("Failed to update plan timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(PlanAction {
            id,
            plan_id,
            phase,
            description: description.into(),
            priority,
            estimated_cost,
            time_required: time_required.map(String::from),
            responsible_party: responsible_party.map(String::from),
            completed: false,
            position: position as u32,
            created_at: now,
            updated_at: now,
        })
    }

    /// Removes the action at `index` in the phase's display order, closing
    /// the gap left behind.
    pub fn remove_action(&mut self, plan_id: u64, phase: Phase, index: u32) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let action_id = Self::resolve_action_id(&tx, plan_id, phase, index)?;

        let position: i64 = tx
            .query_row(SELECT_ACTION_POSITION_SQL, params![action_id], |row| {
                row.get(0)
            })
            .map_err(|e| TrackerError::database_error("Failed to query action position", e))?;

        tx.execute(DELETE_ACTION_SQL, params![action_id])
            .map_err(|e| TrackerError::database_error("Failed to delete action", e))?;

        tx.execute(
            COMPACT_POSITIONS_SQL,
            params![plan_id as i64, phase.as_str(), position],
        )
        .map_err(|e| TrackerError::database_error("Failed to compact action positions", e))?;

        let now_str = Timestamp::now().to_string();
        tx.execute(UPDATE_PLAN_TIMESTAMP_SQL, params![&now_str, plan_id as i64])
            .map_err(|e| TrackerError::database_error("Failed to update plan timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Sets the completion flag of the action at `index` in the phase's
    /// display order and returns the refreshed plan.
    ///
    /// The write is a single-row UPDATE against the action's stable id;
    /// sibling actions are never rewritten, so concurrent toggles of
    /// different actions cannot lose each other's flags. Setting a flag to
    /// its current value is a no-op beyond the timestamp touch.
    pub fn set_action_completion(
        &mut self,
        plan_id: u64,
        phase: Phase,
        index: u32,
        completed: bool,
    ) -> Result<crate::models::EmergencyPlan> {
        {
            let tx = self
                .connection
                .transaction()
                .db_context("Failed to begin transaction")?;

            let action_id = Self::resolve_action_id(&tx, plan_id, phase, index)?;

            let now_str = Timestamp::now().to_string();
            tx.execute(
                UPDATE_ACTION_COMPLETED_SQL,
                params![completed, &now_str, action_id],
            )
            .map_err(|e| TrackerError::database_error("Failed to update action", e))?;

            tx.execute(UPDATE_PLAN_TIMESTAMP_SQL, params![&now_str, plan_id as i64])
                .map_err(|e| TrackerError::database_error("Failed to update plan timestamp", e))?;

            tx.commit().db_context("Failed to commit transaction")?;
        }

        self.get_plan(plan_id)?
            .ok_or(TrackerError::PlanNotFound { id: plan_id })
    }

    /// Resolves a (plan, phase, index) address to a stable action row id.
    ///
    /// Runs inside the caller's transaction. A missing plan reports
    /// PlanNotFound; a valid plan with too few actions in the phase reports
    /// OutOfRange with the phase length.
    fn resolve_action_id(
        tx: &rusqlite::Transaction,
        plan_id: u64,
        phase: Phase,
        index: u32,
    ) -> Result<i64> {
        let action_id: Option<i64> = tx
            .query_row(
                SELECT_ACTION_AT_INDEX_SQL,
                params![plan_id as i64, phase.as_str(), index as i64],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to resolve action")?;

        if let Some(id) = action_id {
            return Ok(id);
        }

        let plan_exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| TrackerError::database_error("Failed to check plan existence", e))?;

        if !plan_exists {
            return Err(TrackerError::PlanNotFound { id: plan_id });
        }

        let len: i64 = tx
            .query_row(
                COUNT_PHASE_ACTIONS_SQL,
                params![plan_id as i64, phase.as_str()],
                |row| row.get(0),
            )
            .map_err(|e| TrackerError::database_error("Failed to count phase actions", e))?;

        Err(TrackerError::OutOfRange {
            phase,
            index,
            len: len as u32,
        })
    }
}
