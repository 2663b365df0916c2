//! High-level tracker API for plans, actions, crises, and recovery.
//!
//! This module provides the main [`Tracker`] interface for interacting with
//! the Aegis crisis tracking system. The tracker coordinates between the
//! application layers and the database, implementing the business logic for
//! ownership checks, action toggles, and recovery synchronization.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │      CLI        │    │   Operations    │    │    Database     │
//! │                 │───▶│ (plan_ops,      │───▶│   (via db/)     │
//! │                 │    │  action_ops, …) │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     User Interface      Business Logic         Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Tracker`] instances with configuration
//! - [`business_ops`]: Business registration and lookup
//! - [`plan_ops`]: Plan lifecycle operations (create, list, show, status)
//! - [`action_ops`]: Action Ledger operations, including the toggle that
//!   drives recovery synchronization
//! - [`crisis_ops`]: Crisis event operations
//! - [`recovery_ops`]: Recovery record reads, the direct update path, and
//!   on-demand metric derivation
//!
//! Every operation is async: the underlying SQLite work runs on the blocking
//! thread pool. Mutating operations take the requester's principal and check
//! ownership before touching anything.
//!
//! # Usage
//!
//! ```rust
//! use aegis_core::{params::ToggleAction, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/tmp/aegis.db"))
//!     .build()
//!     .await?;
//!
//! let params = ToggleAction {
//!     plan_id: 1,
//!     phase: "during".to_string(),
//!     index: 0,
//!     completed: true,
//! };
//! let plan = tracker.toggle_action(&params, "owner@example.com").await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

// Module declarations
pub mod action_ops;
pub mod builder;
pub mod business_ops;
pub mod crisis_ops;
pub mod plan_ops;
pub mod recovery_ops;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use builder::TrackerBuilder;

/// Main tracker interface for plans, actions, crises, and recovery.
pub struct Tracker {
    pub(crate) db_path: PathBuf,
}

impl Tracker {
    /// Creates a new tracker with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}
