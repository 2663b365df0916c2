//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result, TrackerError};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        // Execute the schema SQL
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        // Apply migrations for existing databases
        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Databases created before crisis events could reference a plan lack
        // the emergency_plan_id column
        let has_plan_link: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('crisis_events') WHERE name = 'emergency_plan_id'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        if !has_plan_link {
            self.connection
                .execute(
                    "ALTER TABLE crisis_events ADD COLUMN emergency_plan_id INTEGER REFERENCES plans(id)",
                    [],
                )
                .map_err(|e| {
                    TrackerError::database_error(
                        "Failed to add emergency_plan_id column to crisis_events table",
                        e,
                    )
                })?;
        }

        Ok(())
    }
}
