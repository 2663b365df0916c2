//! Crisis event model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// One active or past incident for a business.
///
/// A crisis event may reference at most one emergency plan; that link is
/// what connects a plan's Action Ledger to the crisis's recovery record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrisisEvent {
    /// Unique identifier for the crisis event
    pub id: u64,

    /// ID of the affected business
    pub business_id: u64,

    /// Kind of crisis ("flood", "fire", ...)
    pub crisis_type: String,

    /// Free-text description of the situation
    pub description: Option<String>,

    /// Free status label ("active", "resolved", ...)
    pub status: String,

    /// The emergency plan driving the response, if one is linked
    pub emergency_plan_id: Option<u64>,

    /// Timestamp when the crisis was recorded (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the crisis was last updated (UTC)
    pub updated_at: Timestamp,
}
