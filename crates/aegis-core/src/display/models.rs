//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core domain
//! models, separated from the model definitions to maintain clean separation
//! of concerns. The implementations produce markdown for rich terminal
//! display, with status icons for action completion.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::metrics;
use crate::models::{
    Business, CrisisEvent, EmergencyPlan, Phase, PlanAction, PlanStatus, PlanSummary, Priority,
    RecoveryProgress, RecoveryStage,
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RecoveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Phase {
    /// Section heading used when rendering a plan's Action Ledger.
    fn heading(&self) -> &'static str {
        match self {
            Phase::Pre => "Pre-Crisis Actions",
            Phase::During => "During-Crisis Actions",
            Phase::Post => "Post-Crisis Actions",
        }
    }
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.completed { "✓" } else { "○" };
        write!(f, "- {icon} {} ({})", self.description, self.priority)?;
        if let Some(party) = &self.responsible_party {
            write!(f, " [{party}]")?;
        }
        if let Some(time) = &self.time_required {
            write!(f, " ~{time}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for EmergencyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Status: {}", self.status)?;
        if let Some(crisis_type) = &self.crisis_type {
            writeln!(f, "- Crisis type: {crisis_type}")?;
        }
        if let Some(cost) = self.estimated_cost {
            writeln!(f, "- Estimated cost: ${cost:.2}")?;
        }
        writeln!(f, "- Completion: {}%", metrics::completion_percent(self))?;
        writeln!(
            f,
            "- Operational capacity: {}%",
            metrics::operational_capacity(self)
        )?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        for phase in [Phase::Pre, Phase::During, Phase::Post] {
            writeln!(f, "\n## {}", phase.heading())?;
            writeln!(f)?;
            let actions = self.actions(phase);
            if actions.is_empty() {
                writeln!(f, "No actions in this phase.")?;
            } else {
                for action in actions {
                    write!(f, "{action}")?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_actions > 0 {
            format!(" ({}/{})", self.completed_actions, self.total_actions)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.name, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Status**: {}", self.status)?;
        if let Some(crisis_type) = &self.crisis_type {
            writeln!(f, "- **Crisis type**: {crisis_type}")?;
        }
        writeln!(f, "- **Completion**: {}%", self.completion_percent())?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?; // Add blank line after each plan

        Ok(())
    }
}

impl fmt::Display for Business {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- Principal: {}", self.principal)?;
        writeln!(f, "- Registered: {}", LocalDateTime(&self.created_at))
    }
}

impl fmt::Display for CrisisEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Crisis {} ({})", self.id, self.crisis_type)?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.status)?;
        if let Some(plan_id) = self.emergency_plan_id {
            writeln!(f, "- Linked plan: {plan_id}")?;
        }
        writeln!(f, "- Opened: {}", LocalDateTime(&self.created_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        Ok(())
    }
}

impl fmt::Display for RecoveryProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Recovery {} (crisis {})", self.id, self.crisis_event_id)?;
        writeln!(f)?;
        writeln!(f, "- Stage: {}", self.recovery_stage)?;
        writeln!(
            f,
            "- Operational capacity: {}%",
            self.operational_capacity_percent
        )?;
        writeln!(f, "- Revenue recovery: {}%", self.revenue_recovery_percent)?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if !self.milestones_completed.is_empty() {
            writeln!(f, "\n## Milestones")?;
            writeln!(f)?;
            for milestone in &self.milestones_completed {
                writeln!(
                    f,
                    "- ✓ {} ({})",
                    milestone.text,
                    LocalDateTime(&milestone.completed_at)
                )?;
            }
        }

        if !self.next_actions.is_empty() {
            writeln!(f, "\n## Next Actions")?;
            writeln!(f)?;
            for (i, action) in self.next_actions.iter().enumerate() {
                writeln!(f, "{}. {action}", i + 1)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for metrics::PlanMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Completion: {}%", self.completion_percent)?;
        writeln!(
            f,
            "- Operational capacity: {}%",
            self.operational_capacity_percent
        )?;

        if self.next_actions.is_empty() {
            writeln!(f, "\nNo outstanding actions.")?;
        } else {
            writeln!(f, "\n## Next Actions")?;
            writeln!(f)?;
            for (i, action) in self.next_actions.iter().enumerate() {
                writeln!(f, "{}. {action}", i + 1)?;
            }
        }

        Ok(())
    }
}
