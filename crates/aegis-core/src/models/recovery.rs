//! Recovery progress model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::RecoveryStage;

/// A completed recovery milestone with its completion time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    /// What was achieved
    pub text: String,

    /// When it was achieved (UTC)
    pub completed_at: Timestamp,
}

/// Recovery state for one crisis event; at most one record per crisis.
///
/// `operational_capacity_percent` and `next_actions` are machine-derived
/// from the linked plan's Action Ledger whenever the crisis references a
/// plan; `revenue_recovery_percent`, the stage, and the milestone history
/// are purely user-set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecoveryProgress {
    /// Unique identifier for the recovery record
    pub id: u64,

    /// ID of the affected business
    pub business_id: u64,

    /// ID of the crisis event this record tracks
    pub crisis_event_id: u64,

    /// User-chosen stage label (no enforced transition order)
    #[serde(default)]
    pub recovery_stage: RecoveryStage,

    /// Estimated operating capacity, 0..=100
    pub operational_capacity_percent: u8,

    /// Revenue recovered relative to pre-crisis baseline, 0..=100
    pub revenue_recovery_percent: u8,

    /// Append-only milestone history, in completion order
    #[serde(default)]
    pub milestones_completed: Vec<Milestone>,

    /// Cached outstanding-action descriptions, overwritten on every
    /// synchronization with the linked plan
    #[serde(default)]
    pub next_actions: Vec<String>,

    /// Timestamp when the record was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the record was last updated (UTC)
    pub updated_at: Timestamp,
}
