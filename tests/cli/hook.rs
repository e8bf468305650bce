use crate::cli::support::{guidance, Fixture};
use predicates::prelude::*;

// ============================================================================
// Files the hook leaves alone
// ============================================================================

#[test]
fn test_outside_tree_is_silent() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    let outside = fixture.dir.path().join("notes.md");
    std::fs::write(&outside, crate::cli::support::prose(500)).unwrap();

    guidance(&fixture)
        .arg("hook")
        .arg(&outside)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_index_file_is_silent() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    let readme = fixture.write_doc("README.md", 500);

    guidance(&fixture)
        .arg("hook")
        .arg(&readme)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_under_threshold_is_silent() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    let doc = fixture.write_doc("a.md", 200);

    guidance(&fixture)
        .arg("hook")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert_eq!(fixture.listing("."), vec!["a.md"]);
}

#[test]
fn test_no_path_is_silent() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();

    guidance(&fixture)
        .arg("hook")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ============================================================================
// Failures never block the edit
// ============================================================================

#[test]
fn test_unavailable_compressor_warns_and_succeeds() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    let doc = fixture.write_doc("a.md", 201);

    guidance(&fixture)
        .arg("hook")
        .arg(&doc)
        .assert()
        .success()
        .stderr(predicate::str::contains("has 201 lines (limit: 200)"))
        .stderr(predicate::str::contains("compressor unavailable"));

    assert_eq!(fixture.listing("."), vec!["a.md"]);
}

#[test]
fn test_broken_config_still_succeeds() {
    let fixture = Fixture::new();
    std::fs::write(fixture.config_dir().join("config.toml"), "root = [").unwrap();
    let doc = fixture.write_doc("a.md", 500);

    guidance(&fixture)
        .arg("hook")
        .arg(&doc)
        .assert()
        .success()
        .stderr(predicate::str::contains("guidance compression skipped"));
}

#[test]
fn test_quiet_suppresses_warnings() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    let doc = fixture.write_doc("a.md", 300);

    guidance(&fixture)
        .args(["--quiet", "hook"])
        .arg(&doc)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ============================================================================
// Compression through the hook
// ============================================================================

#[cfg(unix)]
#[test]
fn test_hook_params_from_environment() {
    let fixture = Fixture::new();
    let worker = fixture.install_worker("compact body");
    fixture.write_config(&worker, "");
    let doc = fixture.write_doc("a.md", 260);
    let params = serde_json::json!({ "file_path": doc }).to_string();

    guidance(&fixture)
        .arg("hook")
        .env("CLAUDE_HOOK_PARAMS", params)
        .assert()
        .success()
        .stdout(predicate::str::contains("a.md has 260 lines (limit: 200)"))
        .stdout(predicate::str::contains("Compressed: 400 -> 200 tokens (2.0x reduction)"))
        .stdout(predicate::str::contains("Saved:"))
        .stdout(predicate::str::contains("a.original.md"));

    assert_eq!(
        fixture.listing("."),
        vec!["a.compressed.md", "a.md", "a.original.md"]
    );
}

#[cfg(unix)]
#[test]
fn test_params_win_over_positional_path() {
    let fixture = Fixture::new();
    let worker = fixture.install_worker("compact body");
    fixture.write_config(&worker, "");
    let edited = fixture.write_doc("edited.md", 260);
    let other = fixture.write_doc("other.md", 260);
    let params = serde_json::json!({ "file_path": edited }).to_string();

    guidance(&fixture)
        .arg("hook")
        .arg(&other)
        .arg("--params")
        .arg(params)
        .assert()
        .success();

    assert_eq!(
        fixture.listing("."),
        vec![
            "edited.compressed.md",
            "edited.md",
            "edited.original.md",
            "other.md"
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_hook_threshold_from_config() {
    let fixture = Fixture::new();
    let worker = fixture.install_worker("compact body");
    fixture.write_config(
        &worker,
        "[thresholds]\nhook_trigger_lines = 400\n",
    );
    let doc = fixture.write_doc("a.md", 300);

    guidance(&fixture)
        .arg("hook")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fixture.listing("."), vec!["a.md"]);
}
