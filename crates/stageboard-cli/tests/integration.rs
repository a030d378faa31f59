#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stageboard(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stageboard").unwrap();
    cmd.current_dir(dir.path())
        .env("STAGEBOARD_ROOT", dir.path())
        .env_remove("STAGEBOARD_REMOTE");
    cmd
}

fn init_project(dir: &TempDir, niche: &str) {
    stageboard(dir)
        .args(["init", "--niche", niche])
        .assert()
        .success();
}

fn json_out(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Create an item and return its id.
fn create(dir: &TempDir, args: &[&str]) -> String {
    let json = json_out(stageboard(dir).args(["item", "create"]).args(args).arg("--json"));
    json["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// stageboard init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_project_files() {
    let dir = TempDir::new().unwrap();
    stageboard(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .stageboard/config.yaml"));

    assert!(dir.path().join(".stageboard").is_dir());
    assert!(dir.path().join(".stageboard/config.yaml").exists());
    assert!(dir.path().join(".stageboard/items.yaml").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_project(&dir, "coach");
    stageboard(&dir)
        .args(["init", "--niche", "podcaster"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .stageboard/config.yaml"));

    let config = std::fs::read_to_string(dir.path().join(".stageboard/config.yaml")).unwrap();
    assert!(config.contains("default_niche: coach"));
}

#[test]
fn init_rejects_unknown_niche() {
    let dir = TempDir::new().unwrap();
    stageboard(&dir)
        .args(["init", "--niche", "chef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported niche: chef"));
}

// ---------------------------------------------------------------------------
// stageboard stages
// ---------------------------------------------------------------------------

#[test]
fn stages_json_includes_status_map() {
    let dir = TempDir::new().unwrap();
    let json = json_out(stageboard(&dir).args(["stages", "coach", "--json"]));

    assert_eq!(json["niche"], "coach");
    assert_eq!(json["stages"].as_array().unwrap().len(), 9);
    assert_eq!(json["status_map"]["won"], "paid");
    assert_eq!(json["status_map"]["prospecting"], "lead");
}

#[test]
fn stages_for_unknown_niche_shows_creator() {
    let dir = TempDir::new().unwrap();
    stageboard(&dir)
        .args(["stages", "chef"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stages for creator"))
        .stdout(predicate::str::contains("Scripting"));
}

// ---------------------------------------------------------------------------
// stageboard item
// ---------------------------------------------------------------------------

#[test]
fn item_create_and_list() {
    let dir = TempDir::new().unwrap();
    init_project(&dir, "creator");

    stageboard(&dir)
        .args(["item", "create", "Launch", "video", "--value", "500", "--platform", "youtube"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created creator"));

    let json = json_out(stageboard(&dir).args(["item", "list", "--json"]));
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Launch video");
    assert_eq!(items[0]["stage"], "idea");
    assert_eq!(items[0]["platform"], "youtube");

    let json = json_out(stageboard(&dir).args(["item", "list", "--niche", "coach", "--json"]));
    assert!(json.as_array().unwrap().is_empty());
}

#[test]
fn item_create_maps_status_to_stage() {
    let dir = TempDir::new().unwrap();
    init_project(&dir, "podcaster");

    let id = create(&dir, &["Guest", "--status", "negotiation"]);
    let json = json_out(stageboard(&dir).args(["item", "show", &id, "--json"]));
    assert_eq!(json["stage"], "booked");
    assert_eq!(json["status"], "negotiation");
}

#[test]
fn item_update_and_delete() {
    let dir = TempDir::new().unwrap();
    init_project(&dir, "freelancer");
    let id = create(&dir, &["Website", "--client", "Acme"]);

    let json = json_out(stageboard(&dir).args([
        "item", "update", &id, "--stage", "proposal", "--split", "percent:10", "--json",
    ]));
    assert_eq!(json["stage"], "proposal");
    assert_eq!(json["client_name"], "Acme");
    assert_eq!(json["revenue_splits"][0]["kind"], "percent");

    stageboard(&dir)
        .args(["item", "update", &id, "--stage", "published"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown stage 'published'"));

    stageboard(&dir)
        .args(["item", "delete", &id])
        .assert()
        .success();
    stageboard(&dir)
        .args(["item", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item not found"));
}

// ---------------------------------------------------------------------------
// stageboard move / board
// ---------------------------------------------------------------------------

#[test]
fn move_commits_transition() {
    let dir = TempDir::new().unwrap();
    init_project(&dir, "coach");
    let id = create(&dir, &["Client"]);

    let json = json_out(stageboard(&dir).args(["move", &id, "discovery_call", "--json"]));
    assert_eq!(json["outcome"], "committed");
    assert_eq!(json["from"], "lead");
    assert_eq!(json["to"], "discovery_call");

    let json = json_out(stageboard(&dir).args(["item", "show", &id, "--json"]));
    assert_eq!(json["stage"], "discovery_call");

    stageboard(&dir)
        .args(["move", &id, "discovery_call"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in Discovery Call"));
}

#[test]
fn move_rejects_foreign_stage() {
    let dir = TempDir::new().unwrap();
    init_project(&dir, "coach");
    let id = create(&dir, &["Client"]);

    stageboard(&dir)
        .args(["move", &id, "published"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown stage 'published' for niche 'coach'"));
}

#[test]
fn board_groups_items_by_stage() {
    let dir = TempDir::new().unwrap();
    init_project(&dir, "coach");
    create(&dir, &["A", "--stage", "paid", "--value", "400"]);
    create(&dir, &["B"]);

    let json = json_out(stageboard(&dir).args(["board", "--json"]));
    assert_eq!(json["niche"], "coach");
    assert_eq!(json["total_items"], 2);
    let columns = json["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 9);
    assert_eq!(columns[0]["items"].as_array().unwrap().len(), 1);
    let paid = columns.iter().find(|c| c["stage"]["id"] == "paid").unwrap();
    assert_eq!(paid["total_value"], 400.0);
}

#[test]
fn board_degrades_to_empty_when_remote_is_down() {
    let dir = TempDir::new().unwrap();
    let json = json_out(
        stageboard(&dir)
            .args(["board", "--niche", "creator", "--json"])
            .env("STAGEBOARD_REMOTE", "http://127.0.0.1:9"),
    );
    assert_eq!(json["total_items"], 0);
    assert_eq!(json["columns"].as_array().unwrap().len(), 6);
}

#[test]
fn item_list_reports_transport_errors() {
    let dir = TempDir::new().unwrap();
    stageboard(&dir)
        .args(["item", "list", "--niche", "creator", "--remote", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("transport error"));
}

// ---------------------------------------------------------------------------
// stageboard revenue
// ---------------------------------------------------------------------------

#[test]
fn revenue_counts_won_items() {
    let dir = TempDir::new().unwrap();
    init_project(&dir, "coach");
    create(&dir, &["Won", "--status", "won", "--value", "1000", "--split", "fixed:100"]);
    create(&dir, &["Paid", "--stage", "paid", "--value", "500"]);
    create(&dir, &["Lead", "--value", "300"]);

    let json = json_out(stageboard(&dir).args(["revenue", "--json"]));
    assert_eq!(json["total_items"], 3);
    assert_eq!(json["revenue"]["won_count"], 2);
    assert_eq!(json["revenue"]["gross"], 1500.0);
    assert_eq!(json["revenue"]["net"], 1400.0);
    assert_eq!(json["series"].as_array().unwrap().len(), 12);
}

#[test]
fn revenue_quarter_window_samples_series() {
    let dir = TempDir::new().unwrap();
    init_project(&dir, "creator");

    let json = json_out(stageboard(&dir).args(["revenue", "--window", "quarter", "--json"]));
    let labels: Vec<_> = json["series"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["label"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, ["Jan", "Apr", "Jul", "Oct"]);
}

#[test]
fn revenue_year_charts_full_year() {
    let dir = TempDir::new().unwrap();
    init_project(&dir, "freelancer");
    create(&dir, &["Old", "--stage", "won", "--value", "800", "--closed-at", "2024-03-15"]);

    let json = json_out(stageboard(&dir).args(["revenue", "--year", "2024", "--window", "ytd", "--json"]));
    let series = json["series"].as_array().unwrap();
    assert_eq!(series.len(), 12);
    assert_eq!(series[2]["total"], 800.0);
}

#[test]
fn revenue_rejects_unknown_window() {
    let dir = TempDir::new().unwrap();
    init_project(&dir, "creator");
    stageboard(&dir)
        .args(["revenue", "--window", "decade"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid window: decade"));
}
