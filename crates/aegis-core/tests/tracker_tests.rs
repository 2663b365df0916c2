//! End-to-end tests for the tracker's public API.

mod common;

use aegis_core::params::{CreatePlan, Id, ListPlans, ToggleAction};
use aegis_core::{PlanStatus, TrackerError};
use common::{create_test_tracker, seed_business_and_plan, OWNER};

#[tokio::test]
async fn full_preparedness_workflow() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_business_and_plan(&tracker).await;

    // Fresh plan: nothing completed, every action outstanding
    let metrics = tracker
        .compute_metrics(&Id { id: plan_id })
        .await
        .expect("Failed to compute metrics");
    assert_eq!(metrics.completion_percent, 0);
    assert_eq!(metrics.operational_capacity_percent, 0);
    assert_eq!(
        metrics.next_actions,
        vec![
            "Shut off gas main".to_string(),
            "Move stock upstairs".to_string(),
            "File insurance claim".to_string(),
            "Back up records offsite".to_string(),
            "Buy sandbags".to_string(),
        ]
    );

    // Work through the during phase
    tracker
        .toggle_action(
            &ToggleAction {
                plan_id,
                phase: "during".to_string(),
                index: 0,
                completed: true,
            },
            OWNER,
        )
        .await
        .expect("Failed to toggle action");

    let metrics = tracker
        .compute_metrics(&Id { id: plan_id })
        .await
        .expect("Failed to compute metrics");
    // 1 of 5 actions done; weighted 2 of 8
    assert_eq!(metrics.completion_percent, 20);
    assert_eq!(metrics.operational_capacity_percent, 25);
    assert_eq!(metrics.next_actions.len(), 4);
    assert_eq!(metrics.next_actions[0], "Move stock upstairs");

    // Retire the plan once the drill is over
    tracker
        .archive_plan(&Id { id: plan_id }, OWNER)
        .await
        .expect("Failed to archive plan");
    let active = tracker
        .list_plans(&ListPlans::default())
        .await
        .expect("Failed to list plans");
    assert!(active.is_empty());
}

#[tokio::test]
async fn create_plan_accepts_generator_payload() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (business_id, _plan_id) = seed_business_and_plan(&tracker).await;

    // Generated plans name the description field "action"; both spellings
    // must deserialize
    let payload = format!(
        r#"{{
            "business_id": {business_id},
            "name": "Fire Response",
            "crisis_type": "fire",
            "during_crisis_actions": [
                {{"action": "Evacuate staff", "priority": "critical"}},
                {{"description": "Call fire department", "priority": "critical"}}
            ],
            "post_crisis_actions": [
                {{"action": "Assess structural damage"}}
            ]
        }}"#
    );
    let params: CreatePlan = serde_json::from_str(&payload).expect("Failed to parse payload");

    let plan = tracker
        .create_plan(&params, OWNER)
        .await
        .expect("Failed to create plan");

    assert_eq!(plan.status, PlanStatus::Draft);
    assert!(plan.pre_crisis_actions.is_empty());
    assert_eq!(plan.during_crisis_actions[0].description, "Evacuate staff");
    assert_eq!(
        plan.during_crisis_actions[1].description,
        "Call fire department"
    );
    // Priority defaults to medium when the generator omits it
    assert_eq!(
        plan.post_crisis_actions[0].priority,
        aegis_core::Priority::Medium
    );
}

#[tokio::test]
async fn invalid_phase_is_rejected_before_any_lookup() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    seed_business_and_plan(&tracker).await;

    let err = tracker
        .toggle_action(
            &ToggleAction {
                plan_id: 999,
                phase: "aftermath".to_string(),
                index: 0,
                completed: true,
            },
            OWNER,
        )
        .await
        .expect_err("Unknown phase should fail");

    // Phase validation fires before the plan lookup, so this is InvalidInput
    // rather than PlanNotFound
    assert!(matches!(err, TrackerError::InvalidInput { .. }));
}

#[tokio::test]
async fn plan_display_renders_ledger_sections() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_business_and_plan(&tracker).await;

    tracker
        .toggle_action(
            &ToggleAction {
                plan_id,
                phase: "pre".to_string(),
                index: 0,
                completed: true,
            },
            OWNER,
        )
        .await
        .expect("Failed to toggle action");

    let plan = tracker
        .get_plan(&Id { id: plan_id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    let output = format!("{plan}");

    assert!(output.contains("# 1. Flood Response"));
    assert!(output.contains("## Pre-Crisis Actions"));
    assert!(output.contains("## During-Crisis Actions"));
    assert!(output.contains("## Post-Crisis Actions"));
    assert!(output.contains("✓ Buy sandbags"));
    assert!(output.contains("○ Shut off gas main (critical)"));
    assert!(output.contains("Completion: 20%"));
}
