use crate::cli::support::{guidance, Fixture};
use predicates::prelude::*;
use std::fs;

// ============================================================================
// Selection and dry runs
// ============================================================================

#[test]
fn test_dry_run_lists_candidates_without_writing() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    fixture.write_doc("a.md", 250);
    fixture.write_doc("b.md", 40);

    guidance(&fixture)
        .args(["compress", "--large", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 file(s) to compress:"))
        .stdout(predicate::str::contains("a.md (250 lines)"))
        .stdout(predicate::str::contains("b.md").not())
        .stdout(predicate::str::contains("Dry run: no files will be compressed"));

    assert_eq!(fixture.listing("."), vec!["a.md", "b.md"]);
}

#[test]
fn test_dry_run_min_override() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    fixture.write_doc("a.md", 250);
    fixture.write_doc("b.md", 40);

    guidance(&fixture)
        .args(["compress", "--large", "--min", "30", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 file(s) to compress:"));
}

#[test]
fn test_min_requires_large() {
    let fixture = Fixture::new();
    guidance(&fixture)
        .args(["compress", "--min", "30"])
        .assert()
        .code(2);
}

#[test]
fn test_dry_run_reports_missing_paths() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    fixture.write_doc("a.md", 250);

    guidance(&fixture)
        .args(["compress", "--dry-run", "guidance/a.md", "guidance/ghost.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.md (250 lines)"))
        .stdout(predicate::str::contains("Ignored during selection:"))
        .stdout(predicate::str::contains("ghost.md"));
}

#[test]
fn test_dry_run_json_plan() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    fixture.write_doc("docs/a.md", 220);
    fixture.write_doc("README.md", 400);

    let output = guidance(&fixture)
        .args(["--format", "json", "compress", "--dir", "docs", "--dry-run"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["mode"], "plan");
    assert_eq!(value["dry_run"], true);
    assert_eq!(value["count"], 1);
    assert_eq!(value["candidates"][0]["lines"], 220);
}

#[test]
fn test_no_matching_files_is_success() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    fixture.write_doc("a.md", 20);

    guidance(&fixture)
        .args(["compress", "--large", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found matching criteria"));
}

#[test]
fn test_ratio_out_of_range_is_usage_error() {
    let fixture = Fixture::new();
    guidance(&fixture)
        .args(["compress", "--large", "--ratio", "1.5"])
        .assert()
        .code(2);
}

// ============================================================================
// Compressor availability
// ============================================================================

#[test]
fn test_unavailable_compressor_aborts_before_writing() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    fixture.write_doc("a.md", 250);

    guidance(&fixture)
        .args(["compress", "--large"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("compressor unavailable"));

    assert_eq!(fixture.listing("."), vec!["a.md"]);
}

#[test]
fn test_unavailable_compressor_json_envelope() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    fixture.write_doc("a.md", 250);

    let output = guidance(&fixture)
        .args(["--format", "json", "compress", "--large"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["error"]["type"], "compressor_unavailable");
    assert!(value["error"]["hint"].is_string());
}

#[cfg(unix)]
#[test]
fn test_non_executable_worker_is_unavailable() {
    let fixture = Fixture::new();
    let worker = fixture.install_script("worker", "exit 0\n", 0o644);
    fixture.write_config(&worker, "");
    fixture.write_doc("a.md", 260);

    guidance(&fixture)
        .args(["compress", "--large"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("compressor unavailable"));

    assert_eq!(fixture.listing("."), vec!["a.md"]);
}

#[cfg(unix)]
#[test]
fn test_worker_dying_at_startup_aborts_run() {
    let fixture = Fixture::new();
    let worker = fixture.install_script("worker", "exit 1\n", 0o755);
    fixture.write_config(&worker, "");
    fixture.write_doc("a.md", 260);
    fixture.write_doc("b.md", 240);

    guidance(&fixture)
        .args(["compress", "--large"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Successfully compressed").not())
        .stderr(predicate::str::contains("compressor unavailable"));

    assert_eq!(fixture.listing("."), vec!["a.md", "b.md"]);
}

// ============================================================================
// Runs against a worker
// ============================================================================

#[cfg(unix)]
#[test]
fn test_run_writes_siblings_and_keeps_original() {
    let fixture = Fixture::new();
    let worker = fixture.install_worker("Rule 0 do it.\nRule 1 do it.");
    fixture.write_config(&worker, "");
    let original = fixture.write_doc("a.md", 250);
    let before = fs::read_to_string(&original).unwrap();

    guidance(&fixture)
        .args(["compress", "--large"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compressed: 250 -> 2 lines"))
        .stdout(predicate::str::contains("Successfully compressed: 1/1"))
        .stdout(predicate::str::contains("Next steps:"))
        .stdout(predicate::str::contains("a.compressed.md"))
        .stderr(predicate::str::contains("[1/1] Processing a.md..."));

    assert_eq!(
        fixture.listing("."),
        vec!["a.compressed.md", "a.md", "a.original.md"]
    );
    assert_eq!(fs::read_to_string(&original).unwrap(), before);
    assert_eq!(
        fs::read_to_string(fixture.root().join("a.original.md")).unwrap(),
        before
    );
    assert_eq!(
        fs::read_to_string(fixture.root().join("a.compressed.md")).unwrap(),
        "Rule 0 do it.\nRule 1 do it."
    );
}

#[cfg(unix)]
#[test]
fn test_header_survives_compression() {
    let fixture = Fixture::new();
    let worker = fixture.install_worker("short body");
    fixture.write_config(&worker, "");
    let content = format!(
        "---\ntitle: Rules\ntags: [a, b]\n---\n{}",
        crate::cli::support::prose(240)
    );
    fixture.write_raw("doc.md", &content);

    guidance(&fixture)
        .args(["compress", "guidance/doc.md"])
        .assert()
        .success();

    let compressed = fs::read_to_string(fixture.root().join("doc.compressed.md")).unwrap();
    assert!(compressed.starts_with("---\ntitle: Rules\ntags: [a, b]\n---\n"));
    assert!(compressed.ends_with("short body"));
}

#[cfg(unix)]
#[test]
fn test_small_explicit_file_is_skipped() {
    let fixture = Fixture::new();
    let worker = fixture.install_worker("x");
    fixture.write_config(&worker, "");
    fixture.write_doc("small.md", 30);

    guidance(&fixture)
        .args(["compress", "guidance/small.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Skipped: 30 lines is below the 150-line minimum",
        ))
        .stdout(predicate::str::contains("Successfully compressed: 0/1"));

    assert_eq!(fixture.listing("."), vec!["small.md"]);
}

#[cfg(unix)]
#[test]
fn test_rerun_excludes_siblings_and_overwrites() {
    let fixture = Fixture::new();
    let worker = fixture.install_worker("compact");
    fixture.write_config(&worker, "");
    fixture.write_doc("a.md", 250);

    for _ in 0..2 {
        guidance(&fixture)
            .args(["compress", "--large", "--min", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Successfully compressed: 1/1"));
    }

    assert_eq!(
        fixture.listing("."),
        vec!["a.compressed.md", "a.md", "a.original.md"]
    );
}

#[cfg(unix)]
#[test]
fn test_run_json_summary() {
    let fixture = Fixture::new();
    let worker = fixture.install_worker("compact");
    fixture.write_config(&worker, "");
    fixture.write_doc("a.md", 250);
    fixture.write_doc("b.md", 20);

    let output = guidance(&fixture)
        .args([
            "--format",
            "json",
            "compress",
            "guidance/a.md",
            "guidance/b.md",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["mode"], "run");
    assert_eq!(value["summary"]["total"], 2);
    assert_eq!(value["summary"]["compressed"], 1);
    assert_eq!(value["summary"]["skipped"], 1);
    assert_eq!(value["summary"]["interrupted"], false);
    assert_eq!(value["results"][0]["status"], "compressed");
    assert_eq!(value["results"][0]["origin_tokens"], 400);
    assert_eq!(value["results"][1]["status"], "skipped");
    assert_eq!(value["next_steps"].as_array().unwrap().len(), 1);
}

#[cfg(unix)]
#[test]
fn test_run_records_output() {
    let fixture = Fixture::new();
    let worker = fixture.install_worker("compact");
    fixture.write_config(&worker, "");
    fixture.write_doc("a.md", 250);

    guidance(&fixture)
        .args(["--format", "records", "compress", "--large"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "H guidance=1 records=1 mode=compress.run",
        ))
        .stdout(predicate::str::contains("R compressed"))
        .stdout(predicate::str::contains("A adopt"));
}
