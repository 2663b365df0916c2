//! Parameter types for tracker operations.
//!
//! Each operation takes a dedicated parameter struct that derives
//! `Deserialize`, so callers (the CLI, tests, future transports) construct
//! requests uniformly. String-typed fields such as `phase` and `status` are
//! validated by `validate()` methods that convert them into domain enums and
//! reject out-of-range values before any database work happens.

use serde::Deserialize;

use crate::error::{invalid_input, Result};
use crate::models::{Phase, PlanStatus, Priority, RecoveryStage};

/// Parameters for operations that address a resource by id.
#[derive(Debug, Clone, Deserialize)]
pub struct Id {
    /// Identifier of the resource
    pub id: u64,
}

/// Parameters for registering a business.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBusiness {
    /// Identity-token subject of the owner
    pub principal: String,
    /// Display name
    pub name: String,
}

impl CreateBusiness {
    /// Validate the business registration fields.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - When the principal or name is blank
    pub fn validate(&self) -> Result<()> {
        if self.principal.trim().is_empty() {
            return Err(invalid_input("principal", "must not be blank"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid_input("name", "must not be blank"));
        }
        Ok(())
    }
}

/// One action in a plan creation request.
///
/// Accepts `action` as an alias for `description` so payloads produced by
/// the plan generator deserialize without a rewrite step.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionSpec {
    /// What needs to be done
    #[serde(alias = "action")]
    pub description: String,
    /// Urgency rank; defaults to medium when absent
    #[serde(default)]
    pub priority: Priority,
    /// Estimated cost of carrying out the action
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    /// Free-text time estimate
    #[serde(default)]
    pub time_required: Option<String>,
    /// Person or role responsible
    #[serde(default)]
    pub responsible_party: Option<String>,
}

/// Parameters for creating a plan, optionally pre-populated with actions.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlan {
    /// ID of the owning business
    pub business_id: u64,
    /// Name of the plan
    pub name: String,
    /// Kind of crisis the plan addresses
    #[serde(default)]
    pub crisis_type: Option<String>,
    /// Author-set total cost estimate
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    /// Preparation actions
    #[serde(default)]
    pub pre_crisis_actions: Vec<ActionSpec>,
    /// Immediate-response actions
    #[serde(default)]
    pub during_crisis_actions: Vec<ActionSpec>,
    /// Recovery actions
    #[serde(default)]
    pub post_crisis_actions: Vec<ActionSpec>,
}

impl CreatePlan {
    /// Validate the plan creation fields.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - When the name is blank, a cost is
    ///   negative, or an action description is blank
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid_input("name", "must not be blank"));
        }
        if let Some(cost) = self.estimated_cost {
            if cost < 0.0 {
                return Err(invalid_input("estimated_cost", "must not be negative"));
            }
        }
        for spec in self
            .pre_crisis_actions
            .iter()
            .chain(&self.during_crisis_actions)
            .chain(&self.post_crisis_actions)
        {
            if spec.description.trim().is_empty() {
                return Err(invalid_input("description", "must not be blank"));
            }
            if let Some(cost) = spec.estimated_cost {
                if cost < 0.0 {
                    return Err(invalid_input("estimated_cost", "must not be negative"));
                }
            }
        }
        Ok(())
    }
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPlans {
    /// Include archived plans in the listing
    #[serde(default)]
    pub archived: bool,
}

/// Parameters for changing a plan's lifecycle status.
#[derive(Debug, Clone, Deserialize)]
pub struct SetPlanStatus {
    /// ID of the plan
    pub id: u64,
    /// New status label
    pub status: String,
}

impl SetPlanStatus {
    /// Parse and validate the status label.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - When the label is not a known status
    pub fn validate(&self) -> Result<PlanStatus> {
        self.status
            .parse()
            .map_err(|_| invalid_input("status", "must be draft, active, in_use, or archived"))
    }
}

/// Parameters for appending an action to one phase of a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct AddAction {
    /// ID of the plan
    pub plan_id: u64,
    /// Phase the action belongs to (pre, during, or post)
    pub phase: String,
    /// What needs to be done
    pub description: String,
    /// Urgency rank; defaults to medium when absent
    #[serde(default)]
    pub priority: Option<String>,
    /// Estimated cost of carrying out the action
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    /// Free-text time estimate
    #[serde(default)]
    pub time_required: Option<String>,
    /// Person or role responsible
    #[serde(default)]
    pub responsible_party: Option<String>,
}

impl AddAction {
    /// Parse and validate the phase, priority, and content fields.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - When the phase or priority label is
    ///   unknown, the description is blank, or the cost is negative
    pub fn validate(&self) -> Result<(Phase, Priority)> {
        let phase: Phase = self
            .phase
            .parse()
            .map_err(|_| invalid_input("phase", "must be pre, during, or post"))?;
        let priority = match &self.priority {
            Some(label) => label.parse().map_err(|_| {
                invalid_input("priority", "must be critical, high, medium, or low")
            })?,
            None => Priority::default(),
        };
        if self.description.trim().is_empty() {
            return Err(invalid_input("description", "must not be blank"));
        }
        if let Some(cost) = self.estimated_cost {
            if cost < 0.0 {
                return Err(invalid_input("estimated_cost", "must not be negative"));
            }
        }
        Ok((phase, priority))
    }
}

/// Parameters for removing an action from a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveAction {
    /// ID of the plan
    pub plan_id: u64,
    /// Phase the action belongs to (pre, during, or post)
    pub phase: String,
    /// Zero-based index within the phase's display order
    pub index: u32,
}

impl RemoveAction {
    /// Parse and validate the phase label.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - When the phase label is unknown
    pub fn validate(&self) -> Result<Phase> {
        self.phase
            .parse()
            .map_err(|_| invalid_input("phase", "must be pre, during, or post"))
    }
}

/// Parameters for setting an action's completion flag.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleAction {
    /// ID of the plan
    pub plan_id: u64,
    /// Phase the action belongs to (pre, during, or post)
    pub phase: String,
    /// Zero-based index within the phase's display order
    pub index: u32,
    /// Desired completion state
    pub completed: bool,
}

impl ToggleAction {
    /// Parse and validate the phase label.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - When the phase label is unknown
    pub fn validate(&self) -> Result<Phase> {
        self.phase
            .parse()
            .map_err(|_| invalid_input("phase", "must be pre, during, or post"))
    }
}

/// Parameters for opening a crisis event.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenCrisis {
    /// ID of the affected business
    pub business_id: u64,
    /// Kind of crisis
    pub crisis_type: String,
    /// Free-text description of the situation
    #[serde(default)]
    pub description: Option<String>,
    /// Plan activated for this crisis, if any
    #[serde(default)]
    pub emergency_plan_id: Option<u64>,
}

impl OpenCrisis {
    /// Validate the crisis fields.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - When the crisis type is blank
    pub fn validate(&self) -> Result<()> {
        if self.crisis_type.trim().is_empty() {
            return Err(invalid_input("crisis_type", "must not be blank"));
        }
        Ok(())
    }
}

/// Parameters for the direct recovery update path.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRecovery {
    /// ID of the recovery record
    pub id: u64,
    /// New stage label
    #[serde(default)]
    pub stage: Option<String>,
    /// Manually assessed operating capacity, 0..=100
    #[serde(default)]
    pub operational_capacity_percent: Option<u8>,
    /// Revenue recovery relative to pre-crisis baseline, 0..=100
    #[serde(default)]
    pub revenue_recovery_percent: Option<u8>,
    /// Milestone text to append to the completed-milestone history
    #[serde(default)]
    pub milestone: Option<String>,
}

impl UpdateRecovery {
    /// Parse and validate the stage label and percentage ranges.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - When the stage label is unknown or a
    ///   percentage exceeds 100
    pub fn validate(&self) -> Result<(Option<RecoveryStage>, Option<u8>, Option<u8>)> {
        let stage = match &self.stage {
            Some(label) => Some(label.parse().map_err(|_| {
                invalid_input(
                    "stage",
                    "must be assessment, cleanup, rebuilding, reopening, stabilization, or complete",
                )
            })?),
            None => None,
        };
        if let Some(percent) = self.operational_capacity_percent {
            if percent > 100 {
                return Err(invalid_input(
                    "operational_capacity_percent",
                    "must be between 0 and 100",
                ));
            }
        }
        if let Some(percent) = self.revenue_recovery_percent {
            if percent > 100 {
                return Err(invalid_input(
                    "revenue_recovery_percent",
                    "must be between 0 and 100",
                ));
            }
        }
        if let Some(milestone) = &self.milestone {
            if milestone.trim().is_empty() {
                return Err(invalid_input("milestone", "must not be blank"));
            }
        }
        Ok((
            stage,
            self.operational_capacity_percent,
            self.revenue_recovery_percent,
        ))
    }
}
