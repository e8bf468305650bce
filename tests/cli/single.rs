use crate::cli::support::{guidance, Fixture};
use predicates::prelude::*;

#[test]
fn test_no_target_is_usage_error() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();

    guidance(&fixture)
        .arg("single")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("oneshot_target"));
}

#[test]
fn test_missing_file_fails() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();

    guidance(&fixture)
        .args(["single", "guidance/ghost.md"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn test_unavailable_compressor_fails_without_writing() {
    let fixture = Fixture::new();
    fixture.write_unavailable_config();
    fixture.write_doc("a.md", 30);

    guidance(&fixture)
        .args(["single", "guidance/a.md"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("compressor unavailable"));

    assert_eq!(fixture.listing("."), vec!["a.md"]);
}

#[cfg(unix)]
#[test]
fn test_statistics_block() {
    let fixture = Fixture::new();
    let worker = fixture.install_worker("Rule one.\nRule two.");
    fixture.write_config(&worker, "");
    // Small files are still compressed: naming the file is the request.
    fixture.write_doc("a.md", 10);

    guidance(&fixture)
        .args(["single", "guidance/a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created:"))
        .stdout(predicate::str::contains("=== COMPRESSION STATISTICS ==="))
        .stdout(predicate::str::contains("Original lines: 10"))
        .stdout(predicate::str::contains("Compressed lines: 2"))
        .stdout(predicate::str::contains("Line reduction: 80.0%"))
        .stdout(predicate::str::contains("Compression ratio: 2.000"))
        .stdout(predicate::str::contains("Compressed file created:"));

    assert_eq!(
        fixture.listing("."),
        vec!["a.compressed.md", "a.md", "a.original.md"]
    );
}

#[cfg(unix)]
#[test]
fn test_oneshot_target_from_config() {
    let fixture = Fixture::new();
    let worker = fixture.install_worker("compact");
    let target = fixture.write_doc("core.md", 50);
    fixture.write_config(
        &worker,
        &format!("oneshot_target = {:?}\n", target.display().to_string()),
    );

    guidance(&fixture)
        .args(["--format", "json", "single"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"single\""))
        .stdout(predicate::str::contains("\"status\": \"compressed\""));

    assert_eq!(
        fixture.listing("."),
        vec!["core.compressed.md", "core.md", "core.original.md"]
    );
}

#[cfg(unix)]
#[test]
fn test_request_follows_config_drop_consecutive() {
    let fixture = Fixture::new();
    let (worker, log) = fixture.install_recording_worker("compact");
    fixture.write_config(&worker, "[compression]\ndrop_consecutive = false\n");
    fixture.write_doc("a.md", 20);

    guidance(&fixture)
        .args(["single", "guidance/a.md", "--ratio", "0.4"])
        .assert()
        .success();

    let request = Fixture::last_request(&log);
    assert_eq!(request["drop_consecutive"], false);
    assert_eq!(request["rate"], 0.4);
    assert!(request["options"].is_object());
}
