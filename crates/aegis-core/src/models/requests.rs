//! Request types for updating models.

use super::RecoveryStage;

/// Validated partial update for a recovery record.
///
/// This is the direct, trust-the-caller write path: it does not consult the
/// Metrics Deriver, so a capacity edit made here can be overwritten by the
/// next action toggle against the linked plan.
#[derive(Debug, Default)]
pub struct UpdateRecoveryRequest {
    pub recovery_stage: Option<RecoveryStage>,
    pub operational_capacity_percent: Option<u8>,
    pub revenue_recovery_percent: Option<u8>,
    /// Milestone text to append to the completed-milestone history
    pub milestone: Option<String>,
}

impl UpdateRecoveryRequest {
    /// Whether the request carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.recovery_stage.is_none()
            && self.operational_capacity_percent.is_none()
            && self.revenue_recovery_percent.is_none()
            && self.milestone.is_none()
    }
}

impl TryFrom<crate::params::UpdateRecovery> for UpdateRecoveryRequest {
    type Error = crate::TrackerError;

    /// Convert UpdateRecovery parameters into a validated request.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - When the stage string is invalid or
    ///   a percentage is outside 0..=100
    fn try_from(params: crate::params::UpdateRecovery) -> Result<Self, Self::Error> {
        let (stage, capacity, revenue) = params.validate()?;

        Ok(Self {
            recovery_stage: stage,
            operational_capacity_percent: capacity,
            revenue_recovery_percent: revenue,
            milestone: params.milestone,
        })
    }
}
