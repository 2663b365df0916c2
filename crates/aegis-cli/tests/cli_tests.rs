use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const OWNER: &str = "owner@example.com";

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn aegis_cmd() -> Command {
    let mut cmd = Command::cargo_bin("aegis").expect("Failed to find aegis binary");
    cmd.arg("--no-color");
    cmd.env_remove("AEGIS_PRINCIPAL");
    cmd
}

/// Registers a business for OWNER against the given database file.
fn register_business(db_arg: &str) {
    aegis_cmd()
        .args([
            "--database-file",
            db_arg,
            "--principal",
            OWNER,
            "business",
            "register",
            "Riverside Bakery",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered business with ID: 1"));
}

#[test]
fn test_cli_register_business() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    register_business(db_path.to_str().unwrap());
}

#[test]
fn test_cli_create_plan_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_business(db_arg);

    aegis_cmd()
        .args([
            "--database-file",
            db_arg,
            "--principal",
            OWNER,
            "plan",
            "create",
            "--business-id",
            "1",
            "--name",
            "Flood Response",
            "--crisis-type",
            "flood",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"))
        .stdout(predicate::str::contains("# 1. Flood Response"));
}

#[test]
fn test_cli_create_plan_from_file() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_business(db_arg);

    // Generated plan documents may use "action" for the description field
    let plan_file = temp_dir.path().join("plan.json");
    std::fs::write(
        &plan_file,
        r#"{
            "business_id": 1,
            "name": "Fire Response",
            "crisis_type": "fire",
            "during_crisis_actions": [
                {"action": "Evacuate staff", "priority": "critical"}
            ],
            "post_crisis_actions": [
                {"description": "Assess structural damage"}
            ]
        }"#,
    )
    .expect("Failed to write plan file");

    aegis_cmd()
        .args([
            "--database-file",
            db_arg,
            "--principal",
            OWNER,
            "plan",
            "create",
            "--from-file",
            plan_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 1. Fire Response"))
        .stdout(predicate::str::contains("Evacuate staff"))
        .stdout(predicate::str::contains("Assess structural damage"));
}

#[test]
fn test_cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    aegis_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_action_lifecycle() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_business(db_arg);

    aegis_cmd()
        .args([
            "--database-file",
            db_arg,
            "--principal",
            OWNER,
            "plan",
            "create",
            "--business-id",
            "1",
            "--name",
            "Flood Response",
        ])
        .assert()
        .success();

    aegis_cmd()
        .args([
            "--database-file",
            db_arg,
            "--principal",
            OWNER,
            "action",
            "add",
            "1",
            "during",
            "Shut off gas main",
            "--priority",
            "critical",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created action with ID: 1"))
        .stdout(predicate::str::contains("Shut off gas main"));

    aegis_cmd()
        .args([
            "--database-file",
            db_arg,
            "--principal",
            OWNER,
            "action",
            "complete",
            "1",
            "during",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Action marked completed"))
        .stdout(predicate::str::contains("✓ Shut off gas main"));
}

#[test]
fn test_cli_metrics_output() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_business(db_arg);

    aegis_cmd()
        .args([
            "--database-file",
            db_arg,
            "--principal",
            OWNER,
            "plan",
            "create",
            "--business-id",
            "1",
            "--name",
            "Flood Response",
        ])
        .assert()
        .success();

    aegis_cmd()
        .args([
            "--database-file",
            db_arg,
            "--principal",
            OWNER,
            "action",
            "add",
            "1",
            "pre",
            "Buy sandbags",
        ])
        .assert()
        .success();

    aegis_cmd()
        .args(["--database-file", db_arg, "metrics", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completion: 0%"))
        .stdout(predicate::str::contains("Buy sandbags"));
}

#[test]
fn test_cli_mutation_requires_principal() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    aegis_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "business",
            "register",
            "Riverside Bakery",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No principal given"));
}

#[test]
fn test_cli_foreign_principal_is_rejected() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    register_business(db_arg);

    aegis_cmd()
        .args([
            "--database-file",
            db_arg,
            "--principal",
            OWNER,
            "plan",
            "create",
            "--business-id",
            "1",
            "--name",
            "Flood Response",
        ])
        .assert()
        .success();

    aegis_cmd()
        .args([
            "--database-file",
            db_arg,
            "--principal",
            "rival@example.com",
            "business",
            "register",
            "Rival Cafe",
        ])
        .assert()
        .success();

    aegis_cmd()
        .args([
            "--database-file",
            db_arg,
            "--principal",
            "rival@example.com",
            "action",
            "add",
            "1",
            "pre",
            "Buy sandbags",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not own"));
}

#[test]
fn test_cli_show_missing_plan_reports_error() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    aegis_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "show",
            "42",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan 42 not found"));
}
