use std::path::PathBuf;

use aegis_core::params::{ActionSpec, CreateBusiness, CreatePlan};
use aegis_core::{Priority, Tracker, TrackerBuilder};
use tempfile::TempDir;

pub const OWNER: &str = "owner@example.com";

/// Helper function to create a test tracker
pub async fn create_test_tracker() -> (TempDir, Tracker, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker, db_path)
}

pub fn action_spec(description: &str, priority: Priority) -> ActionSpec {
    ActionSpec {
        description: description.to_string(),
        priority,
        estimated_cost: None,
        time_required: None,
        responsible_party: None,
    }
}

/// Registers a business for OWNER and creates a plan with actions in all
/// three phases. Returns (business_id, plan_id).
pub async fn seed_business_and_plan(tracker: &Tracker) -> (u64, u64) {
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
                estimated_cost: None,
                pre_crisis_actions: vec![
                    action_spec("Buy sandbags", Priority::Medium),
                    action_spec("Back up records offsite", Priority::High),
                ],
                during_crisis_actions: vec![
                    action_spec("Shut off gas main", Priority::Critical),
                    action_spec("Move stock upstairs", Priority::High),
                ],
                post_crisis_actions: vec![action_spec("File insurance claim", Priority::High)],
            },
            OWNER,
        )
        .await
        .expect("Failed to create plan");

    (business.id, plan.id)
}
