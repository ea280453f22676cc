//! End-to-end tests for the schema editing commands.

mod fixtures;
use fixtures::*;

use lazypanel::services::persistence::SCHEMA_KEY;

#[test]
fn test_new_creates_default_grid() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_ok(&["new"]);
    assert!(stdout.contains("Created 3x10 schema"), "stdout: {stdout}");

    let snapshot = sandbox.storage_dir().join(format!("{SCHEMA_KEY}.json"));
    assert!(snapshot.exists(), "Snapshot should be written");
}

#[test]
fn test_new_clamps_dimensions() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_ok(&["new", "--rows", "20", "--cols", "0"]);
    assert!(stdout.contains("clamped"), "stdout: {stdout}");
    assert!(stdout.contains("Created 8x10 schema"), "stdout: {stdout}");
}

#[test]
fn test_place_show_and_erase() {
    let sandbox = Sandbox::new();
    sandbox.run_ok(&["new", "--rows", "2", "--cols", "6"]);

    let stdout = sandbox.run_ok(&[
        "place", "--cell", "A2", "--kind", "2", "--phase", "L3", "--text", "Oven",
    ]);
    assert!(stdout.contains("Placed 2P at A2-A3"), "stdout: {stdout}");

    let table = sandbox.run_ok(&["show"]);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[1], "A     .  2P   =   .   .   .");
    assert!(table.contains("A2-A3"));
    assert!(table.contains("Oven"));

    // Erasing any covered cell removes the whole module
    let stdout = sandbox.run_ok(&["erase", "--cell", "A3"]);
    assert!(stdout.contains("Erased A2-A3"), "stdout: {stdout}");
    assert!(sandbox.run_ok(&["show"]).contains("No modules placed"));

    let stdout = sandbox.run_ok(&["erase", "--cell", "A3"]);
    assert!(stdout.contains("already empty"), "stdout: {stdout}");
}

#[test]
fn test_place_overwrites_covered_modules() {
    let sandbox = Sandbox::new();
    sandbox.run_ok(&["new", "--rows", "1", "--cols", "6"]);
    sandbox.run_ok(&["place", "--cell", "A1", "--kind", "2"]);
    sandbox.run_ok(&["place", "--cell", "A4", "--kind", "1"]);
    sandbox.run_ok(&["place", "--cell", "A2", "--kind", "3"]);

    let table = sandbox.run_ok(&["show"]);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[1], "A     .  3P   =   =   .   .");
}

#[test]
fn test_place_out_of_bounds_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox.run_ok(&["new", "--rows", "1", "--cols", "4"]);
    sandbox.run_ok(&["place", "--cell", "A1", "--kind", "1"]);

    let output = sandbox.run(&["place", "--cell", "A3", "--kind", "3"]);
    assert_exit_code(&output, 1);

    // Nothing changed
    let table = sandbox.run_ok(&["show"]);
    assert_eq!(table.lines().nth(1), Some("A    1P   .   .   ."));
}

#[test]
fn test_place_rejects_bad_arguments() {
    let sandbox = Sandbox::new();
    sandbox.run_ok(&["new"]);

    assert_exit_code(&sandbox.run(&["place", "--cell", "Z9", "--kind", "1"]), 1);
    assert_exit_code(&sandbox.run(&["place", "--cell", "A1", "--kind", "4"]), 1);
    assert_exit_code(
        &sandbox.run(&["place", "--cell", "A1", "--kind", "1", "--color", "nope"]),
        1,
    );
    assert_exit_code(
        &sandbox.run(&["place", "--cell", "A1", "--kind", "1", "--phase", "L4"]),
        1,
    );
}

#[test]
fn test_commands_without_schema_fail() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["show"]);
    assert_exit_code(&output, 1);
    assert!(stderr(&output).contains("Error:"));

    assert_exit_code(&sandbox.run(&["place", "--cell", "A1", "--kind", "1"]), 1);
}

#[test]
fn test_rcd_ignores_requested_color() {
    let sandbox = Sandbox::new();
    sandbox.run_ok(&["new", "--rows", "1", "--cols", "4"]);
    sandbox.run_ok(&["place", "--cell", "A1", "--kind", "rcd", "--color", "#000000"]);

    let json = sandbox.run_ok(&["show", "--json"]);
    assert!(!json.contains("#000000"), "json: {json}");
}

#[test]
fn test_show_json_snapshot() {
    let sandbox = Sandbox::new();
    sandbox.run_ok(&["new", "--rows", "2", "--cols", "5"]);
    sandbox.run_ok(&[
        "place", "--cell", "B1", "--kind", "3", "--text", "Heat\\npump",
    ]);

    let json = sandbox.run_ok(&["show", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(value["rowCount"], 2);
    assert_eq!(value["colCount"], 5);

    let row = value["grid"][1].as_array().expect("row array");
    assert_eq!(row.len(), 5);
    assert_eq!(row[0]["annotationText"], "Heat\npump");
    // Only the anchor cell carries the module
    assert!(row[1].is_null());
    assert!(row[2].is_null());
}

#[test]
fn test_clear_removes_schema() {
    let sandbox = Sandbox::new();
    sandbox.run_ok(&["new"]);
    let stdout = sandbox.run_ok(&["clear"]);
    assert!(stdout.contains("Schema cleared"));

    assert_exit_code(&sandbox.run(&["show"]), 1);
    // Clearing again is harmless
    sandbox.run_ok(&["clear"]);
}

#[test]
fn test_schema_survives_between_runs_from_legacy_snapshot() {
    let sandbox = Sandbox::new();
    std::fs::create_dir_all(sandbox.storage_dir()).unwrap();
    std::fs::write(
        sandbox.storage_dir().join(format!("{SCHEMA_KEY}.json")),
        r#"{"rows":"2","cols":"4","gridState":[[null,null,null,null],[null,null,null,null]]}"#,
    )
    .unwrap();

    let table = sandbox.run_ok(&["show"]);
    assert!(table.starts_with("      1   2   3   4"), "table: {table}");
    assert_eq!(table.lines().filter(|l| l.starts_with('B')).count(), 1);
}
