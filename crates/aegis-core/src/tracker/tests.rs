//! Tests for the tracker module.

use std::path::PathBuf;

use tempfile::TempDir;

use super::*;
use crate::{
    db::Database,
    error::TrackerError,
    models::{Phase, PlanStatus, Priority, RecoveryStage},
    params::{
        ActionSpec, AddAction, CreateBusiness, CreatePlan, Id, ListPlans, OpenCrisis,
        RemoveAction, SetPlanStatus, ToggleAction, UpdateRecovery,
    },
};

const OWNER: &str = "owner@example.com";

/// Helper function to create a test tracker
async fn create_test_tracker() -> (TempDir, Tracker, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker, db_path)
}

fn spec(description: &str, priority: Priority) -> ActionSpec {
    ActionSpec {
        description: description.to_string(),
        priority,
        estimated_cost: None,
        time_required: None,
        responsible_party: None,
    }
}

/// Registers a business for OWNER and creates a plan with a few actions.
async fn seed_plan(tracker: &Tracker) -> (u64, u64) {
    let business = tracker
        .create_business(&CreateBusiness {
            principal: OWNER.to_string(),
            name: "Riverside Bakery".to_string(),
        })
        .await
        .expect("Failed to create business");

    let plan = tracker
        .create_plan(
            &CreatePlan {
                business_id: business.id,
                name: "Flood Response".to_string(),
                crisis_type: Some("flood".to_string()),
                estimated_cost: Some(1500.0),
                pre_crisis_actions: vec![spec("Buy sandbags", Priority::Medium)],
                during_crisis_actions: vec![
                    spec("Shut off gas main", Priority::Critical),
                    spec("Move stock upstairs", Priority::High),
                ],
                post_crisis_actions: vec![spec("File insurance claim", Priority::High)],
            },
            OWNER,
        )
        .await
        .expect("Failed to create plan");

    (business.id, plan.id)
}

#[tokio::test]
async fn test_create_plan_seeds_action_ledger() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_plan(&tracker).await;

    let plan = tracker
        .get_plan(&Id { id: plan_id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");

    assert_eq!(plan.status, PlanStatus::Draft);
    assert_eq!(plan.pre_crisis_actions.len(), 1);
    assert_eq!(plan.during_crisis_actions.len(), 2);
    assert_eq!(plan.post_crisis_actions.len(), 1);
    assert_eq!(plan.during_crisis_actions[0].description, "Shut off gas main");
    assert_eq!(plan.during_crisis_actions[0].position, 0);
    assert_eq!(plan.during_crisis_actions[1].position, 1);
    assert!(plan.all_actions().all(|a| !a.completed));
}

#[tokio::test]
async fn test_toggle_action_sets_completion_flag() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_plan(&tracker).await;

    let plan = tracker
        .toggle_action(
            &ToggleAction {
                plan_id,
                phase: "during".to_string(),
                index: 1,
                completed: true,
            },
            OWNER,
        )
        .await
        .expect("Failed to toggle action");

    assert!(plan.during_crisis_actions[1].completed);
    assert!(!plan.during_crisis_actions[0].completed);

    // Toggling back off works the same way
    let plan = tracker
        .toggle_action(
            &ToggleAction {
                plan_id,
                phase: "during".to_string(),
                index: 1,
                completed: false,
            },
            OWNER,
        )
        .await
        .expect("Failed to toggle action off");
    assert!(!plan.during_crisis_actions[1].completed);
}

#[tokio::test]
async fn test_toggle_action_is_idempotent() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_plan(&tracker).await;

    let params = ToggleAction {
        plan_id,
        phase: "pre".to_string(),
        index: 0,
        completed: true,
    };

    let first = tracker
        .toggle_action(&params, OWNER)
        .await
        .expect("Failed to toggle action");
    let second = tracker
        .toggle_action(&params, OWNER)
        .await
        .expect("Repeated toggle should succeed");

    assert!(first.pre_crisis_actions[0].completed);
    assert!(second.pre_crisis_actions[0].completed);
}

#[tokio::test]
async fn test_toggle_action_out_of_range_leaves_plan_unchanged() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_plan(&tracker).await;

    let err = tracker
        .toggle_action(
            &ToggleAction {
                plan_id,
                phase: "post".to_string(),
                index: 7,
                completed: true,
            },
            OWNER,
        )
        .await
        .expect_err("Out-of-range index should fail");

    match err {
        TrackerError::OutOfRange { phase, index, len } => {
            assert_eq!(phase, Phase::Post);
            assert_eq!(index, 7);
            assert_eq!(len, 1);
        }
        other => panic!("Expected OutOfRange, got {other:?}"),
    }

    let plan = tracker
        .get_plan(&Id { id: plan_id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert!(plan.all_actions().all(|a| !a.completed));
}

#[tokio::test]
async fn test_toggle_action_unknown_plan() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    seed_plan(&tracker).await;

    let err = tracker
        .toggle_action(
            &ToggleAction {
                plan_id: 999,
                phase: "pre".to_string(),
                index: 0,
                completed: true,
            },
            OWNER,
        )
        .await
        .expect_err("Unknown plan should fail");
    assert!(matches!(err, TrackerError::PlanNotFound { id: 999 }));
}

#[tokio::test]
async fn test_toggle_action_requires_ownership() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_plan(&tracker).await;

    tracker
        .create_business(&CreateBusiness {
            principal: "rival@example.com".to_string(),
            name: "Rival Deli".to_string(),
        })
        .await
        .expect("Failed to create second business");

    let params = ToggleAction {
        plan_id,
        phase: "pre".to_string(),
        index: 0,
        completed: true,
    };

    let err = tracker
        .toggle_action(&params, "rival@example.com")
        .await
        .expect_err("Foreign principal should be rejected");
    assert!(matches!(err, TrackerError::Forbidden { .. }));

    let err = tracker
        .toggle_action(&params, "nobody@example.com")
        .await
        .expect_err("Unregistered principal should be rejected");
    assert!(matches!(err, TrackerError::BusinessNotFound { .. }));

    // The rejected attempts must not have touched the ledger
    let plan = tracker
        .get_plan(&Id { id: plan_id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert!(!plan.pre_crisis_actions[0].completed);
}

#[tokio::test]
async fn test_toggle_without_linked_crisis_creates_no_recovery() {
    let (_temp_dir, tracker, db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_plan(&tracker).await;

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

    let db = Database::new(&db_path).expect("Failed to open database");
    let crisis = db
        .get_crisis_for_plan(plan_id)
        .expect("Failed to query crisis");
    assert!(crisis.is_none());
}

#[tokio::test]
async fn test_toggle_with_linked_crisis_creates_recovery_lazily() {
    let (_temp_dir, tracker, db_path) = create_test_tracker().await;
    let (business_id, plan_id) = seed_plan(&tracker).await;

    let crisis = tracker
        .open_crisis(
            &OpenCrisis {
                business_id,
                crisis_type: "flood".to_string(),
                description: Some("River breached the levee".to_string()),
                emergency_plan_id: Some(plan_id),
            },
            OWNER,
        )
        .await
        .expect("Failed to open crisis");

    // No recovery record until the first toggle
    {
        let db = Database::new(&db_path).expect("Failed to open database");
        assert!(db
            .get_recovery_for_crisis(crisis.id)
            .expect("Failed to query recovery")
            .is_none());
    }

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

    let db = Database::new(&db_path).expect("Failed to open database");
    let recovery = db
        .get_recovery_for_crisis(crisis.id)
        .expect("Failed to query recovery")
        .expect("Recovery record should have been created");

    assert_eq!(recovery.recovery_stage, RecoveryStage::Assessment);
    assert_eq!(recovery.revenue_recovery_percent, 0);
    assert!(recovery.milestones_completed.is_empty());
    // Weighted capacity: during 2 actions (1 done), post 1, pre 1.
    // total = 2*3 + 1 = 7, completed = 2, round(200/7) = 29.
    assert_eq!(recovery.operational_capacity_percent, 29);
    // Completed action is excluded; during comes before post before pre
    assert_eq!(
        recovery.next_actions,
        vec![
            "Move stock upstairs".to_string(),
            "File insurance claim".to_string(),
            "Buy sandbags".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_sync_preserves_user_owned_fields() {
    let (_temp_dir, tracker, db_path) = create_test_tracker().await;
    let (business_id, plan_id) = seed_plan(&tracker).await;

    let crisis = tracker
        .open_crisis(
            &OpenCrisis {
                business_id,
                crisis_type: "flood".to_string(),
                description: None,
                emergency_plan_id: Some(plan_id),
            },
            OWNER,
        )
        .await
        .expect("Failed to open crisis");

    // First toggle creates the record
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

    let recovery_id = {
        let db = Database::new(&db_path).expect("Failed to open database");
        db.get_recovery_for_crisis(crisis.id)
            .expect("Failed to query recovery")
            .expect("Recovery record should exist")
            .id
    };

    // User sets stage, revenue, a milestone, and a manual capacity figure
    tracker
        .update_recovery(
            &UpdateRecovery {
                id: recovery_id,
                stage: Some("cleanup".to_string()),
                operational_capacity_percent: Some(90),
                revenue_recovery_percent: Some(35),
                milestone: Some("Power restored".to_string()),
            },
            OWNER,
        )
        .await
        .expect("Failed to update recovery");

    // Next toggle re-syncs: capacity and next actions are recomputed, the
    // user's stage, revenue, and milestones survive
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

    let db = Database::new(&db_path).expect("Failed to open database");
    let recovery = db
        .get_recovery(recovery_id)
        .expect("Failed to query recovery")
        .expect("Recovery record should exist");

    assert_eq!(recovery.recovery_stage, RecoveryStage::Cleanup);
    assert_eq!(recovery.revenue_recovery_percent, 35);
    assert_eq!(recovery.milestones_completed.len(), 1);
    assert_eq!(recovery.milestones_completed[0].text, "Power restored");
    // Manual 90% was overwritten by the derived value:
    // completed weight = 2 (during) + 1 (pre) = 3 of 7, round(300/7) = 43.
    assert_eq!(recovery.operational_capacity_percent, 43);
    assert!(!recovery
        .next_actions
        .contains(&"Shut off gas main".to_string()));
}

#[tokio::test]
async fn test_add_and_remove_action_resync_recovery() {
    let (_temp_dir, tracker, db_path) = create_test_tracker().await;
    let (business_id, plan_id) = seed_plan(&tracker).await;

    let crisis = tracker
        .open_crisis(
            &OpenCrisis {
                business_id,
                crisis_type: "flood".to_string(),
                description: None,
                emergency_plan_id: Some(plan_id),
            },
            OWNER,
        )
        .await
        .expect("Failed to open crisis");

    let action = tracker
        .add_action(
            &AddAction {
                plan_id,
                phase: "during".to_string(),
                description: "Call emergency services".to_string(),
                priority: Some("critical".to_string()),
                estimated_cost: None,
                time_required: None,
                responsible_party: None,
            },
            OWNER,
        )
        .await
        .expect("Failed to add action");
    assert_eq!(action.position, 2);

    {
        let db = Database::new(&db_path).expect("Failed to open database");
        let recovery = db
            .get_recovery_for_crisis(crisis.id)
            .expect("Failed to query recovery")
            .expect("Adding an action should have synced a record");
        assert!(recovery
            .next_actions
            .contains(&"Call emergency services".to_string()));
    }

    tracker
        .remove_action(
            &RemoveAction {
                plan_id,
                phase: "during".to_string(),
                index: 2,
            },
            OWNER,
        )
        .await
        .expect("Failed to remove action");

    let plan = tracker
        .get_plan(&Id { id: plan_id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(plan.during_crisis_actions.len(), 2);
    // Positions stay gapless after removal
    assert_eq!(plan.during_crisis_actions[0].position, 0);
    assert_eq!(plan.during_crisis_actions[1].position, 1);

    let db = Database::new(&db_path).expect("Failed to open database");
    let recovery = db
        .get_recovery_for_crisis(crisis.id)
        .expect("Failed to query recovery")
        .expect("Recovery record should exist");
    assert!(!recovery
        .next_actions
        .contains(&"Call emergency services".to_string()));
}

#[tokio::test]
async fn test_list_plans_hides_archived() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_plan(&tracker).await;

    let summaries = tracker
        .list_plans(&ListPlans { archived: false })
        .await
        .expect("Failed to list plans");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_actions, 4);
    assert_eq!(summaries[0].completed_actions, 0);

    tracker
        .archive_plan(&Id { id: plan_id }, OWNER)
        .await
        .expect("Failed to archive plan");

    let active = tracker
        .list_plans(&ListPlans { archived: false })
        .await
        .expect("Failed to list plans");
    assert!(active.is_empty());

    let all = tracker
        .list_plans(&ListPlans { archived: true })
        .await
        .expect("Failed to list all plans");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, PlanStatus::Archived);
}

#[tokio::test]
async fn test_set_plan_status() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_plan(&tracker).await;

    let plan = tracker
        .set_plan_status(
            &SetPlanStatus {
                id: plan_id,
                status: "in_use".to_string(),
            },
            OWNER,
        )
        .await
        .expect("Failed to set plan status");
    assert_eq!(plan.status, PlanStatus::InUse);
}

#[tokio::test]
async fn test_update_recovery_requires_ownership() {
    let (_temp_dir, tracker, db_path) = create_test_tracker().await;
    let (business_id, plan_id) = seed_plan(&tracker).await;

    let crisis = tracker
        .open_crisis(
            &OpenCrisis {
                business_id,
                crisis_type: "flood".to_string(),
                description: None,
                emergency_plan_id: Some(plan_id),
            },
            OWNER,
        )
        .await
        .expect("Failed to open crisis");

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

    let recovery_id = {
        let db = Database::new(&db_path).expect("Failed to open database");
        db.get_recovery_for_crisis(crisis.id)
            .expect("Failed to query recovery")
            .expect("Recovery record should exist")
            .id
    };

    tracker
        .create_business(&CreateBusiness {
            principal: "rival@example.com".to_string(),
            name: "Rival Deli".to_string(),
        })
        .await
        .expect("Failed to create second business");

    let err = tracker
        .update_recovery(
            &UpdateRecovery {
                id: recovery_id,
                stage: Some("complete".to_string()),
                operational_capacity_percent: None,
                revenue_recovery_percent: None,
                milestone: None,
            },
            "rival@example.com",
        )
        .await
        .expect_err("Foreign principal should be rejected");
    assert!(matches!(err, TrackerError::Forbidden { .. }));
}

#[tokio::test]
async fn test_compute_metrics_matches_plan_state() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_plan(&tracker).await;

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

    // 1 of 4 actions completed
    assert_eq!(metrics.completion_percent, 25);
    assert_eq!(metrics.operational_capacity_percent, 29);
    assert_eq!(metrics.next_actions.len(), 3);
    assert_eq!(metrics.next_actions[0], "Move stock upstairs");
}

#[tokio::test]
async fn test_open_crisis_rejects_foreign_plan() {
    let (_temp_dir, tracker, _db_path) = create_test_tracker().await;
    let (_business_id, plan_id) = seed_plan(&tracker).await;

    let rival = tracker
        .create_business(&CreateBusiness {
            principal: "rival@example.com".to_string(),
            name: "Rival Deli".to_string(),
        })
        .await
        .expect("Failed to create second business");

    let err = tracker
        .open_crisis(
            &OpenCrisis {
                business_id: rival.id,
                crisis_type: "fire".to_string(),
                description: None,
                emergency_plan_id: Some(plan_id),
            },
            "rival@example.com",
        )
        .await
        .expect_err("Linking another business's plan should fail");
    assert!(matches!(err, TrackerError::Forbidden { .. }));
}
