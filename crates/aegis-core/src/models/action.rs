//! Plan action model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Phase, Priority};

/// One unit of response work inside an emergency plan.
///
/// Actions carry a stable generated `id`; the `(phase, position)` pair is
/// only a display-order hint. Callers address actions by `(phase, index)`
/// through the tracker API, which resolves the index to an id inside the
/// mutating transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanAction {
    /// Unique identifier for the action
    pub id: u64,

    /// ID of the owning plan
    pub plan_id: u64,

    /// Temporal phase the action belongs to
    pub phase: Phase,

    /// What needs to be done (required, non-empty)
    pub description: String,

    /// Declared urgency; defaults to medium when the generator omits it
    #[serde(default)]
    pub priority: Priority,

    /// Estimated cost in whole currency units, if known
    pub estimated_cost: Option<f64>,

    /// Rough time estimate, free text ("2 hours", "1 week")
    pub time_required: Option<String>,

    /// Who carries the action out, free text
    pub responsible_party: Option<String>,

    /// Whether the action has been carried out
    #[serde(default)]
    pub completed: bool,

    /// Display order within the phase (0-indexed)
    pub position: u32,

    /// Timestamp when the action was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the action was last updated (UTC)
    pub updated_at: Timestamp,
}
