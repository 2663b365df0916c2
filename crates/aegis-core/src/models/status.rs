//! Status and classification enumerations for plans, actions, and recovery.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Temporal bucket of an emergency plan's actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Preparation before the crisis hits
    Pre,

    /// Active response while the crisis is ongoing
    During,

    /// Recovery work after the crisis
    Post,
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pre" => Ok(Phase::Pre),
            "during" => Ok(Phase::During),
            "post" => Ok(Phase::Post),
            _ => Err(format!("Invalid phase: {s}")),
        }
    }
}

impl Phase {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Pre => "pre",
            Phase::During => "during",
            Phase::Post => "post",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declared urgency of a response action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Must happen before anything else
    Critical,

    /// Important, schedule early
    High,

    /// Standard priority
    #[default]
    Medium,

    /// Can wait
    Low,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Sort rank: lower sorts first when prioritizing outstanding actions.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

/// Type-safe enumeration of plan lifecycle statuses.
///
/// Plans are never hard-deleted; retiring a plan moves it to `Archived`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Freshly generated, not yet reviewed
    #[default]
    Draft,

    /// Reviewed and ready
    Active,

    /// Currently driving a live crisis response
    InUse,

    /// Retired and hidden from normal views
    Archived,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PlanStatus::Draft),
            "active" => Ok(PlanStatus::Active),
            "in_use" | "inuse" => Ok(PlanStatus::InUse),
            "archived" => Ok(PlanStatus::Archived),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "draft",
            PlanStatus::Active => "active",
            PlanStatus::InUse => "in_use",
            PlanStatus::Archived => "archived",
        }
    }
}

/// Stage label of a recovery effort.
///
/// The six values are semantically ordered but transitions are not enforced:
/// the stage is a user-chosen label and may legitimately move backwards
/// (e.g. back to `Cleanup` after a setback), so any value can follow any
/// other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStage {
    /// Assessing the damage
    #[default]
    Assessment,

    /// Clearing debris and stabilizing the site
    Cleanup,

    /// Repairing and rebuilding
    Rebuilding,

    /// Preparing to reopen
    Reopening,

    /// Open again, stabilizing operations
    Stabilization,

    /// Recovery finished
    Complete,
}

impl FromStr for RecoveryStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assessment" => Ok(RecoveryStage::Assessment),
            "cleanup" => Ok(RecoveryStage::Cleanup),
            "rebuilding" => Ok(RecoveryStage::Rebuilding),
            "reopening" => Ok(RecoveryStage::Reopening),
            "stabilization" => Ok(RecoveryStage::Stabilization),
            "complete" => Ok(RecoveryStage::Complete),
            _ => Err(format!("Invalid recovery stage: {s}")),
        }
    }
}

impl RecoveryStage {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryStage::Assessment => "assessment",
            RecoveryStage::Cleanup => "cleanup",
            RecoveryStage::Rebuilding => "rebuilding",
            RecoveryStage::Reopening => "reopening",
            RecoveryStage::Stabilization => "stabilization",
            RecoveryStage::Complete => "complete",
        }
    }
}
