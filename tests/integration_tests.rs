//! Integration tests for the leadflow CLI
//!
//! Each test runs the binary against a lead book written into a temp project.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const LEAD_BOOK: &str = r#"{
  "leads": [
    {"id": "L-1", "name": "Alice Archer", "email": "alice@acme.io", "phone": "555-0101",
     "company": "Acme", "source": "Website", "status": "new", "assignedAgent": "Sam",
     "createdAt": "2024-03-01", "nextFollowUp": "2024-03-08"},
    {"id": "L-2", "name": "Bob Baker", "email": "bob@globex.io", "phone": "555-0102",
     "company": "Globex", "source": "Referral", "status": "converted", "assignedAgent": "Ana",
     "createdAt": "2024-02-20", "nextFollowUp": "2024-03-01"},
    {"id": "L-3", "name": "Cara Cole", "email": "cara@initech.io",
     "company": "Initech, \"West\"", "source": "Website", "status": "lost",
     "assignedAgent": "Sam", "createdAt": "2024-02-25"}
  ],
  "users": [
    {"id": "U-1", "name": "Sam", "email": "sam@crm.io", "role": "agent", "status": "active"},
    {"id": "U-2", "name": "Ana", "email": "ana@crm.io", "role": "agent", "status": "active"},
    {"id": "U-3", "name": "Mia", "email": "mia@crm.io", "role": "manager", "status": "active"},
    {"id": "U-4", "name": "Old", "email": "old@crm.io", "role": "agent", "status": "inactive"}
  ]
}"#;

/// Helper to create a leadflow Command with no environment overrides leaking in
fn leadflow() -> Command {
    let mut cmd = cargo_bin_cmd!("leadflow");
    cmd.env_remove("LEADFLOW_DATASET")
        .env_remove("LEADFLOW_FOLLOW_UP_DAYS")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create a temp project with `leads.json` at its root
fn create_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("leads.json"), LEAD_BOOK).unwrap();
    dir
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).unwrap()
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_leadflow_help() {
        leadflow()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("summary"))
            .stdout(predicate::str::contains("export"));
    }

    #[test]
    fn test_leadflow_version() {
        leadflow().arg("--version").assert().success();
    }

    #[test]
    fn test_stages_in_pipeline_order() {
        let out = stdout_of(leadflow().arg("stages"));
        let labels = [
            "New",
            "Contacted",
            "Qualified",
            "Proposal",
            "Negotiation",
            "Converted",
            "Lost",
        ];
        let positions: Vec<usize> = labels.iter().map(|l| out.find(l).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_dataset_fails() {
        let dir = TempDir::new().unwrap();
        leadflow()
            .current_dir(dir.path())
            .arg("leads")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Could not load lead book"));
    }

    #[test]
    fn test_data_flag_overrides_default_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("book.json"), LEAD_BOOK).unwrap();
        leadflow()
            .current_dir(dir.path())
            .args(["--data", "book.json", "leads"])
            .assert()
            .success()
            .stdout(predicate::str::contains("3 lead(s)"));
    }

    #[test]
    fn test_dataset_env_var() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("env.json"), LEAD_BOOK).unwrap();
        leadflow()
            .current_dir(dir.path())
            .env("LEADFLOW_DATASET", "env.json")
            .arg("leads")
            .assert()
            .success()
            .stdout(predicate::str::contains("Bob Baker"));
    }
}

// =============================================================================
// Lead Listing Tests
// =============================================================================

mod leads {
    use super::*;

    #[test]
    fn test_lists_all_leads() {
        let dir = create_project();
        let out = stdout_of(leadflow().current_dir(dir.path()).arg("leads"));
        assert!(out.contains("Alice Archer"));
        assert!(out.contains("Bob Baker"));
        assert!(out.contains("Cara Cole"));
        assert!(out.contains("3 lead(s)"));
    }

    #[test]
    fn test_status_filter() {
        let dir = create_project();
        let out = stdout_of(
            leadflow()
                .current_dir(dir.path())
                .args(["leads", "--status", "converted"]),
        );
        assert!(out.contains("Bob Baker"));
        assert!(!out.contains("Alice Archer"));
        assert!(out.contains("1 lead(s)"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let dir = create_project();
        let out = stdout_of(
            leadflow()
                .current_dir(dir.path())
                .args(["leads", "--search", "ACME"]),
        );
        assert!(out.contains("Alice Archer"));
        assert!(out.contains("1 lead(s)"));
    }

    #[test]
    fn test_filters_are_anded() {
        let dir = create_project();
        let out = stdout_of(leadflow().current_dir(dir.path()).args([
            "leads", "--source", "Website", "--agent", "Sam", "--status", "all",
        ]));
        assert!(out.contains("Alice Archer"));
        assert!(out.contains("Cara Cole"));
        assert!(out.contains("2 lead(s)"));
    }

    #[test]
    fn test_no_match_message() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["leads", "--search", "nobody"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No leads match"));
    }

    #[test]
    fn test_unknown_status_fails() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["leads", "--status", "won"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown stage 'won'"));
    }

    #[test]
    fn test_agent_scope() {
        let dir = create_project();
        let out = stdout_of(leadflow().current_dir(dir.path()).args(["leads", "--as", "Sam"]));
        assert!(out.contains("Alice Archer"));
        assert!(out.contains("Cara Cole"));
        assert!(!out.contains("Bob Baker"));
    }

    #[test]
    fn test_manager_scope_sees_everything() {
        let dir = create_project();
        let out = stdout_of(leadflow().current_dir(dir.path()).args(["leads", "--as", "U-3"]));
        assert!(out.contains("3 lead(s)"));
    }

    #[test]
    fn test_inactive_user_sees_nothing() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["leads", "--as", "Old"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No leads match"));
    }

    #[test]
    fn test_unknown_user_fails() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["leads", "--as", "Zed"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown user 'Zed'"));
    }

    #[test]
    fn test_sorted_json_output() {
        let dir = create_project();
        let out = stdout_of(leadflow().current_dir(dir.path()).args([
            "leads", "--sort", "created", "--desc", "--json",
        ]));
        let leads: serde_json::Value = serde_json::from_str(&out).unwrap();
        let names: Vec<&str> = leads
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Alice Archer", "Cara Cole", "Bob Baker"]);
        assert_eq!(leads[0]["assignedAgent"], "Sam");
    }

    #[test]
    fn test_invalid_sort_key_fails() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["leads", "--sort", "size"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid sort key"));
    }

    #[test]
    fn test_due_follow_ups() {
        let dir = create_project();
        let out = stdout_of(
            leadflow()
                .current_dir(dir.path())
                .args(["due", "--on", "2024-03-10"]),
        );
        assert!(out.contains("Alice Archer"));
        // Bob is converted, so his follow-up no longer counts.
        assert!(!out.contains("Bob Baker"));
    }

    #[test]
    fn test_nothing_due() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["due", "--on", "2024-03-01"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing due."));
    }

    #[test]
    fn test_due_rejects_bad_date() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["due", "--on", "next week"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Expected YYYY-MM-DD"));
    }
}

// =============================================================================
// Aggregate Tests
// =============================================================================

mod aggregates {
    use super::*;

    #[test]
    fn test_summary_json() {
        let dir = create_project();
        let out = stdout_of(
            leadflow()
                .current_dir(dir.path())
                .args(["summary", "--json"]),
        );
        let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(summary["total"], 3);
        assert_eq!(summary["conversionRate"], 33.3);
        assert_eq!(summary["countsByStage"]["new"], 1);
        assert_eq!(summary["countsByStage"]["contacted"], 0);
        assert_eq!(summary["countsByStage"]["converted"], 1);
        assert_eq!(summary["countsByStage"]["lost"], 1);
        assert_eq!(summary["stages"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_summary_table() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .arg("summary")
            .assert()
            .success()
            .stdout(predicate::str::contains("Pipeline Summary"))
            .stdout(predicate::str::contains("33.3%"));
    }

    #[test]
    fn test_summary_of_empty_selection_is_zero() {
        let dir = create_project();
        let out = stdout_of(leadflow().current_dir(dir.path()).args([
            "summary", "--search", "nobody", "--json",
        ]));
        let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(summary["total"], 0);
        assert_eq!(summary["conversionRate"], 0.0);
    }

    #[test]
    fn test_rollup_by_source() {
        let dir = create_project();
        let out = stdout_of(
            leadflow()
                .current_dir(dir.path())
                .args(["rollup", "source", "--json"]),
        );
        let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["key"], "Referral");
        assert_eq!(rows[0]["conversionRate"], 100.0);
        assert_eq!(rows[1]["key"], "Website");
        assert_eq!(rows[1]["total"], 2);
        assert_eq!(rows[1]["conversionRate"], 0.0);
    }

    #[test]
    fn test_rollup_by_agent_table() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["rollup", "agent"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Agent Rollup"))
            .stdout(predicate::str::contains("Ana"));
    }

    #[test]
    fn test_rollup_rejects_unknown_key() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["rollup", "company"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid rollup key"));
    }
}

// =============================================================================
// Export Tests
// =============================================================================

mod export {
    use super::*;

    #[test]
    fn test_export_leads_to_stdout() {
        let dir = create_project();
        let out = stdout_of(
            leadflow()
                .current_dir(dir.path())
                .args(["export", "leads", "--output", "-"]),
        );
        let lines: Vec<&str> = out.trim_end_matches('\n').split('\n').collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "\"Name\",\"Email\",\"Phone\",\"Company\",\"Source\",\"Status\",\"Assigned Agent\",\"Date\",\"Next Follow Up\""
        );
        assert!(lines[2].contains("\"Converted\""));
        assert!(lines[3].contains("\"Initech, \"\"West\"\"\""));
        assert!(lines[3].ends_with(",\"\""));
    }

    #[test]
    fn test_export_leads_default_file() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["export", "leads", "--status", "new"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Exported 1 leads"));

        let csv = fs::read_to_string(dir.path().join("leads.csv")).unwrap();
        assert!(!csv.ends_with('\n'));
        assert_eq!(csv.split('\n').count(), 2);
        assert!(csv.contains("\"Alice Archer\""));
    }

    #[test]
    fn test_export_users_to_file() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["export", "users", "-o", "out/team.csv"])
            .assert()
            .success();

        let csv = fs::read_to_string(dir.path().join("out/team.csv")).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "\"Name\",\"Email\",\"Role\",\"Status\"");
        assert!(lines[4].contains("\"Inactive\""));
    }

    #[test]
    fn test_export_rejects_unknown_report() {
        let dir = create_project();
        leadflow()
            .current_dir(dir.path())
            .args(["export", "deals"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid report"));
    }
}

// =============================================================================
// Config Tests
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_show_defaults() {
        let dir = TempDir::new().unwrap();
        leadflow()
            .current_dir(dir.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No leadflow.toml found"))
            .stdout(predicate::str::contains("follow_up_days = 7"));
    }

    #[test]
    fn test_config_init_then_show() {
        let dir = TempDir::new().unwrap();
        leadflow()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created leadflow.toml"));
        assert!(dir.path().join(".leadflow/leadflow.toml").exists());

        leadflow()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));

        leadflow()
            .current_dir(dir.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Config file:"));
    }

    #[test]
    fn test_config_follow_up_env_override() {
        let dir = TempDir::new().unwrap();
        leadflow()
            .current_dir(dir.path())
            .env("LEADFLOW_FOLLOW_UP_DAYS", "14")
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("follow_up_days = 14"));
    }

    #[test]
    fn test_config_validate_defaults() {
        let dir = TempDir::new().unwrap();
        leadflow()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Using defaults (valid)"));
    }

    #[test]
    fn test_config_validate_warnings() {
        let dir = create_project();
        fs::create_dir_all(dir.path().join(".leadflow")).unwrap();
        fs::write(
            dir.path().join(".leadflow/leadflow.toml"),
            "[defaults]\nfollow_up_days = 0\n\n[sources]\nknown = [\"Website\"]\n",
        )
        .unwrap();

        leadflow()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("follow_up_days = 0"))
            .stdout(predicate::str::contains("'Referral'"));
    }

    #[test]
    fn test_config_export_file_setting() {
        let dir = create_project();
        fs::create_dir_all(dir.path().join(".leadflow")).unwrap();
        fs::write(
            dir.path().join(".leadflow/leadflow.toml"),
            "[export]\nleads_file = \"reports/pipeline.csv\"\n",
        )
        .unwrap();

        leadflow()
            .current_dir(dir.path())
            .args(["export", "leads"])
            .assert()
            .success();
        assert!(dir.path().join("reports/pipeline.csv").exists());
    }
}
