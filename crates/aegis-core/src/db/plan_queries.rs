//! Plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{EmergencyPlan, Phase, PlanAction, PlanStatus, PlanSummary},
    params::CreatePlan,
};

// SQL queries as const strings for compile-time optimization
const INSERT_PLAN_SQL: &str = "INSERT INTO plans (business_id, name, crisis_type, status, estimated_cost, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const INSERT_ACTION_SQL: &str = "INSERT INTO actions (plan_id, phase, description, priority, estimated_cost, time_required, responsible_party, completed, position, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const SELECT_PLAN_BY_ID_SQL: &str = "SELECT id, business_id, name, crisis_type, status, estimated_cost, created_at, updated_at FROM plans WHERE id = ?1";
const SELECT_ACTIONS_BY_PLAN_SQL: &str = "SELECT id, plan_id, phase, description, priority, estimated_cost, time_required, responsible_party, completed, position, created_at, updated_at FROM actions WHERE plan_id = ?1 ORDER BY phase, position";
const SELECT_SUMMARIES_SQL: &str = "SELECT id, business_id, name, crisis_type, status, estimated_cost, created_at, updated_at, total_actions, completed_actions FROM plan_summaries WHERE status != 'archived' ORDER BY updated_at DESC";
const SELECT_SUMMARIES_WITH_ARCHIVED_SQL: &str = "SELECT id, business_id, name, crisis_type, status, estimated_cost, created_at, updated_at, total_actions, completed_actions FROM plan_summaries ORDER BY updated_at DESC";
const UPDATE_PLAN_STATUS_SQL: &str = "UPDATE plans SET status = ?1, updated_at = ?2 WHERE id = ?3";

impl super::Database {
    /// Helper function to construct a plan shell (no actions) from a row
    fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<EmergencyPlan> {
        let status_str: String = row.get(4)?;
        let status = status_str.parse::<PlanStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Text,
                format!("Invalid status: {status_str}").into(),
            )
        })?;

        Ok(EmergencyPlan {
            id: row.get::<_, i64>(0)? as u64,
            business_id: row.get::<_, i64>(1)? as u64,
            name: row.get(2)?,
            crisis_type: row.get(3)?,
            status,
            estimated_cost: row.get(5)?,
            created_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(7)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e))
            })?,
            pre_crisis_actions: Vec::new(),
            during_crisis_actions: Vec::new(),
            post_crisis_actions: Vec::new(),
        })
    }

    /// Helper function to construct a summary from a plan_summaries row
    fn build_summary_from_row(row: &rusqlite::Row) -> rusqlite::Result<PlanSummary> {
        let status_str: String = row.get(4)?;
        let status = status_str.parse::<PlanStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                Type::Text,
                format!("Invalid status: {status_str}").into(),
            )
        })?;

        Ok(PlanSummary {
            id: row.get::<_, i64>(0)? as u64,
            business_id: row.get::<_, i64>(1)? as u64,
            name: row.get(2)?,
            crisis_type: row.get(3)?,
            status,
            estimated_cost: row.get(5)?,
            created_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(7)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e))
            })?,
            total_actions: row.get::<_, i64>(8)? as u32,
            completed_actions: row.get::<_, i64>(9)? as u32,
        })
    }

    /// Creates a new plan, inserting one row per initial action.
    ///
    /// Actions keep the order they appear in the request; positions start at
    /// zero within each phase.
    pub fn create_plan(&mut self, request: &CreatePlan) -> Result<EmergencyPlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                request.business_id as i64,
                &request.name,
                &request.crisis_type,
                PlanStatus::Draft.as_str(),
                request.estimated_cost,
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| TrackerError::database_error("Failed to insert plan", e))?;

        let plan_id = tx.last_insert_rowid() as u64;

        let phases = [
            (Phase::Pre, &request.pre_crisis_actions),
            (Phase::During, &request.during_crisis_actions),
            (Phase::Post, &request.post_crisis_actions),
        ];
        for (phase, specs) in phases {
            for (position, spec) in specs.iter().enumerate() {
                tx.execute(
                    INSERT_ACTION_SQL,
                    params![
                        plan_id as i64,
                        phase.as_str(),
                        &spec.description,
                        spec.priority.as_str(),
                        spec.estimated_cost,
                        &spec.time_required,
                        &spec.responsible_party,
                        false,
                        position as i64,
                        &now_str,
                        &now_str
                    ],
                )
                .map_err(|e| TrackerError::database_error("Failed to insert action", e))?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_plan(plan_id)?
            .ok_or(TrackerError::PlanNotFound { id: plan_id })
    }

    /// Retrieves a plan with its full three-phase Action Ledger.
    pub fn get_plan(&self, plan_id: u64) -> Result<Option<EmergencyPlan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_BY_ID_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let plan = stmt
            .query_row(params![plan_id as i64], Self::build_plan_from_row)
            .optional()
            .db_context("Failed to get plan")?;

        let Some(mut plan) = plan else {
            return Ok(None);
        };

        let mut stmt = self
            .connection
            .prepare(SELECT_ACTIONS_BY_PLAN_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let actions = stmt
            .query_map(params![plan_id as i64], Self::build_action_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query actions", e))?
            .collect::<std::result::Result<Vec<PlanAction>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch actions", e))?;

        for action in actions {
            match action.phase {
                Phase::Pre => plan.pre_crisis_actions.push(action),
                Phase::During => plan.during_crisis_actions.push(action),
                Phase::Post => plan.post_crisis_actions.push(action),
            }
        }

        Ok(Some(plan))
    }

    /// Lists plan summaries, newest first. Archived plans are hidden unless
    /// requested.
    pub fn list_plans(&self, include_archived: bool) -> Result<Vec<PlanSummary>> {
        let sql = if include_archived {
            SELECT_SUMMARIES_WITH_ARCHIVED_SQL
        } else {
            SELECT_SUMMARIES_SQL
        };
        let mut stmt = self
            .connection
            .prepare(sql)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let summaries = stmt
            .query_map([], Self::build_summary_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query plan summaries", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch plan summaries", e))?;

        Ok(summaries)
    }

    /// Changes a plan's lifecycle status.
    pub fn set_plan_status(&mut self, plan_id: u64, status: PlanStatus) -> Result<()> {
        let now_str = Timestamp::now().to_string();
        let updated = self
            .connection
            .execute(
                UPDATE_PLAN_STATUS_SQL,
                params![status.as_str(), &now_str, plan_id as i64],
            )
            .map_err(|e| TrackerError::database_error("Failed to update plan status", e))?;

        if updated == 0 {
            return Err(TrackerError::PlanNotFound { id: plan_id });
        }
        Ok(())
    }
}
