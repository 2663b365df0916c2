//! Data models for plans, actions, crises, and recovery records.
//!
//! This module contains the core domain models of the Aegis crisis tracking
//! system. Display implementations live in [`crate::display::models`] to keep
//! data structures separate from presentation logic.
//!
//! The central relationships:
//!
//! - A [`Business`] owns [`EmergencyPlan`]s and [`CrisisEvent`]s.
//! - An [`EmergencyPlan`] owns three ordered [`PlanAction`] sequences, one
//!   per [`Phase`] (the Action Ledger).
//! - A [`CrisisEvent`] may link to one plan; its [`RecoveryProgress`] record
//!   mirrors the plan's derived metrics whenever that link exists.

pub mod action;
pub mod business;
pub mod crisis;
pub mod plan;
pub mod recovery;
pub mod requests;
pub mod status;
pub mod summary;

#[cfg(test)]
mod tests;

// Re-export all public types at the models level
pub use action::PlanAction;
pub use business::Business;
pub use crisis::CrisisEvent;
pub use plan::EmergencyPlan;
pub use recovery::{Milestone, RecoveryProgress};
pub use requests::UpdateRecoveryRequest;
pub use status::{Phase, PlanStatus, Priority, RecoveryStage};
pub use summary::PlanSummary;
