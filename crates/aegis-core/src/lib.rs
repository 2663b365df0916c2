//! Core library for the Aegis crisis preparedness and recovery tracker.
//!
//! This crate provides the business logic for managing emergency plans and
//! their three-phase Action Ledgers, crisis events, and recovery progress
//! records, including database operations, derived metrics, and error
//! handling.
//!
//! # Architecture
//!
//! - **Domain Models** ([`models`]): Plans, actions, crises, recovery records
//! - **Metrics Deriver** ([`metrics`]): Pure functions deriving completion,
//!   weighted operational capacity, and prioritized next actions from a plan
//!   snapshot
//! - **Tracker** ([`tracker`]): Async operations with ownership checks and
//!   plan-to-recovery synchronization
//! - **Display Wrappers** ([`display`]): Markdown formatting for terminal
//!   rendering
//!
//! Whenever an action's completion flag changes on a plan that a crisis
//! event links to, the tracker recomputes the plan's metrics and pushes them
//! into the crisis's recovery record. The recovery record's capacity and
//! next-actions fields are therefore caches of ledger state; its stage,
//! revenue figure, and milestones belong to the user.
//!
//! # Quick Start
//!
//! ```rust
//! use aegis_core::{
//!     params::{CreateBusiness, CreatePlan, ListPlans},
//!     TrackerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("aegis.db"))
//!     .build()
//!     .await?;
//!
//! let business = tracker
//!     .create_business(&CreateBusiness {
//!         principal: "owner@example.com".to_string(),
//!         name: "Riverside Bakery".to_string(),
//!     })
//!     .await?;
//!
//! let plan = tracker
//!     .create_plan(
//!         &CreatePlan {
//!             business_id: business.id,
//!             name: "Flood Response".to_string(),
//!             crisis_type: Some("flood".to_string()),
//!             estimated_cost: None,
//!             pre_crisis_actions: vec![],
//!             during_crisis_actions: vec![],
//!             post_crisis_actions: vec![],
//!         },
//!         "owner@example.com",
//!     )
//!     .await?;
//! println!("Created plan: {}", plan);
//!
//! let plans = tracker.list_plans(&ListPlans::default()).await?;
//! for plan in &plans {
//!     println!("Plan: {}", plan.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod metrics;
pub mod models;
pub mod params;
pub mod tracker;

// Re-export commonly used types
pub use db::Database;
pub use display::{CreateResult, LocalDateTime, OperationStatus, PlanSummaries, UpdateResult};
pub use error::{Result, TrackerError};
pub use metrics::PlanMetrics;
pub use models::{
    Business, CrisisEvent, EmergencyPlan, Milestone, Phase, PlanAction, PlanStatus, PlanSummary,
    Priority, RecoveryProgress, RecoveryStage, UpdateRecoveryRequest,
};
pub use params::{
    AddAction, CreateBusiness, CreatePlan, Id, ListPlans, OpenCrisis, RemoveAction, SetPlanStatus,
    ToggleAction, UpdateRecovery,
};
pub use tracker::{Tracker, TrackerBuilder};
