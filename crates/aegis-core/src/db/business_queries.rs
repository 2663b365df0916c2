//! Business registration and lookup queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::Business,
};

const INSERT_BUSINESS_SQL: &str =
    "INSERT INTO businesses (principal, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_BUSINESS_BY_PRINCIPAL_SQL: &str =
    "SELECT id, principal, name, created_at, updated_at FROM businesses WHERE principal = ?1";
const SELECT_BUSINESS_BY_ID_SQL: &str =
    "SELECT id, principal, name, created_at, updated_at FROM businesses WHERE id = ?1";

impl super::Database {
    /// Helper function to construct a Business from a database row
    fn build_business_from_row(row: &rusqlite::Row) -> rusqlite::Result<Business> {
        Ok(Business {
            id: row.get::<_, i64>(0)? as u64,
            principal: row.get(1)?,
            name: row.get(2)?,
            created_at: row.get::<_, String>(3)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Registers a new business for the given principal.
    pub fn create_business(&mut self, principal: &str, name: &str) -> Result<Business> {
        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_BUSINESS_SQL,
                params![principal, name, &now_str, &now_str],
            )
            .map_err(|e| TrackerError::database_error("Failed to insert business", e))?;

        Ok(Business {
            id: self.connection.last_insert_rowid() as u64,
            principal: principal.into(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Resolves a requester's principal to their registered business.
    pub fn get_business_by_principal(&self, principal: &str) -> Result<Business> {
        let mut stmt = self
            .connection
            .prepare(SELECT_BUSINESS_BY_PRINCIPAL_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        stmt.query_row(params![principal], Self::build_business_from_row)
            .optional()
            .db_context("Failed to query business")?
            .ok_or_else(|| TrackerError::BusinessNotFound {
                principal: principal.into(),
            })
    }

    /// Retrieves a business by its ID.
    pub fn get_business(&self, id: u64) -> Result<Option<Business>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_BUSINESS_BY_ID_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        stmt.query_row(params![id as i64], Self::build_business_from_row)
            .optional()
            .db_context("Failed to query business")
    }
}
