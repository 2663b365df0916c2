//! Display formatting functions and result types.
//!
//! This module provides Display implementations for the domain models along
//! with wrapper types for collections and operation results, enabling
//! consistent markdown output across commands.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (PlanSummaries)
//! - [`results`]: Operation result types (CreateResult, UpdateResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! All formatters produce markdown for rich terminal rendering; wrappers own
//! their data so they can be returned directly from tracker operations.

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::PlanSummaries;
pub use datetime::LocalDateTime;
pub use results::{CreateResult, UpdateResult};
pub use status::OperationStatus;
