use super::*;

#[test]
fn phase_parses_expected_labels() {
    assert_eq!("pre".parse::<Phase>().unwrap(), Phase::Pre);
    assert_eq!("during".parse::<Phase>().unwrap(), Phase::During);
    assert_eq!("post".parse::<Phase>().unwrap(), Phase::Post);
    assert!("aftermath".parse::<Phase>().is_err());
}

#[test]
fn phase_round_trips_through_display() {
    for phase in [Phase::Pre, Phase::During, Phase::Post] {
        assert_eq!(phase.as_str().parse::<Phase>().unwrap(), phase);
    }
}

#[test]
fn priority_ranks_are_ordered() {
    assert!(Priority::Critical.rank() < Priority::High.rank());
    assert!(Priority::High.rank() < Priority::Medium.rank());
    assert!(Priority::Medium.rank() < Priority::Low.rank());
}

#[test]
fn priority_defaults_to_medium() {
    assert_eq!(Priority::default(), Priority::Medium);
}

#[test]
fn plan_status_parses_in_use_variants() {
    assert_eq!("in_use".parse::<PlanStatus>().unwrap(), PlanStatus::InUse);
    assert_eq!("inuse".parse::<PlanStatus>().unwrap(), PlanStatus::InUse);
    assert!("retired".parse::<PlanStatus>().is_err());
}

#[test]
fn recovery_stage_serializes_lowercase() {
    let json = serde_json::to_string(&RecoveryStage::Stabilization).unwrap();
    assert_eq!(json, r#""stabilization""#);
    let stage: RecoveryStage = serde_json::from_str(r#""assessment""#).unwrap();
    assert_eq!(stage, RecoveryStage::Assessment);
}

#[test]
fn milestone_serializes_with_completion_time() {
    let milestone = Milestone {
        text: "Power restored".to_string(),
        completed_at: jiff::Timestamp::from_second(1_700_000_000).unwrap(),
    };
    let json = serde_json::to_string(&milestone).unwrap();
    let parsed: Milestone = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, milestone);
}

#[test]
fn update_recovery_request_reports_emptiness() {
    let empty = UpdateRecoveryRequest::default();
    assert!(empty.is_empty());

    let with_milestone = UpdateRecoveryRequest {
        milestone: Some("Reopened storefront".to_string()),
        ..Default::default()
    };
    assert!(!with_milestone.is_empty());
}
