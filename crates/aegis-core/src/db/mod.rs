//! Database operations and SQLite management for the crisis tracker.
//!
//! This module provides low-level database operations for the Aegis crisis
//! tracking system. It handles SQLite connections, schema management, and
//! specialized query interfaces for businesses, plans, actions, crises, and
//! recovery records.
//!
//! Actions are stored one row per action with a stable generated id, so a
//! completion toggle is a single-row UPDATE. Two writers flipping different
//! actions on the same plan can never clobber each other's flags.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod action_queries;
pub mod business_queries;
pub mod crisis_queries;
pub mod migrations;
pub mod plan_queries;
pub mod recovery_queries;

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
