use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Single target with --dry-run should print the dry-run message and exit 0.
#[test]
fn test_single_target_dry_run() {
    cargo_bin_cmd!("scanlaunch")
        .args(&["https://example.com/path?x=1", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[DRY RUN] Would scan target: https://example.com/path?x=1",
        ));
}

/// List file with --dry-run validates every line; bad lines are reported, good ones still pass.
#[test]
fn test_list_file_dry_run() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "192.168.1.1").unwrap();
    writeln!(file, "scanme.nmap.org/index.html").unwrap();
    writeln!(file, "localhost").unwrap();

    let path = file.path().to_str().unwrap().to_string();

    cargo_bin_cmd!("scanlaunch")
        .args(&["-l", &path, "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN] Would scan target: 192.168.1.1"))
        .stdout(predicate::str::contains("[DRY RUN] Would scan target: scanme.nmap.org/index.html"))
        .stdout(predicate::str::contains("2/3 target(s) accepted"))
        .stderr(predicate::str::contains("Please enter a valid IP address, domain name, or URL"));
}

/// An invalid only target exits non-zero with the inline message.
#[test]
fn test_invalid_target_fails() {
    cargo_bin_cmd!("scanlaunch")
        .args(&["http://", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL format"));
}

/// Accepted requests are appended to the launch log with the raw target.
#[test]
fn test_output_log_records_raw_request() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("launches.jsonl");

    cargo_bin_cmd!("scanlaunch")
        .args(&["https://Example.com/login", "-s", "stealth", "-d", "edge", "-o"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("Stealth Scan"));

    let text = std::fs::read_to_string(&log).unwrap();
    assert!(text.contains(r#""target":"https://Example.com/login""#));
    assert!(text.contains(r#""scanType":"stealth""#));
}

/// A JSON request file replaces the positional flags.
#[test]
fn test_request_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"target":"10.0.0.7","scanType":"comprehensive"}}"#).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    cargo_bin_cmd!("scanlaunch")
        .args(&["--request", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("10.0.0.7"))
        .stdout(predicate::str::contains("Comprehensive Scan"));
}

/// Profile flags would be silently ignored next to a request file, so clap rejects them.
#[test]
fn test_request_file_conflicts_with_profile_flags() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"target":"10.0.0.7"}}"#).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    cargo_bin_cmd!("scanlaunch")
        .args(&["--request", &path, "-s", "stealth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));

    cargo_bin_cmd!("scanlaunch")
        .args(&["--request", &path, "-d", "notes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

/// Request files accept scan type keys in any case, like the -s flag path.
#[test]
fn test_request_file_scan_type_any_case() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"target":"10.0.0.7","scanType":"Stealth"}}"#).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    cargo_bin_cmd!("scanlaunch")
        .args(&["--request", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stealth Scan"));
}

/// A failed launch-log write must not be preceded by a "queued" line.
#[cfg(target_os = "linux")]
#[test]
fn test_failed_log_write_reports_nothing_queued() {
    cargo_bin_cmd!("scanlaunch")
        .args(&["10.0.0.1", "-o", "/dev/full"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Scan queued").not())
        .stderr(predicate::str::contains("10.0.0.1"));
}

/// The console summary comes out whole, one field per line.
#[test]
fn test_console_summary_lines() {
    cargo_bin_cmd!("scanlaunch")
        .args(&["scanme.nmap.org", "-s", "comprehensive", "-d", "weekly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[+] Scan queued:  scanme.nmap.org"))
        .stdout(predicate::str::contains("    Duration:     10-15 minutes"))
        .stdout(predicate::str::contains("    Notes:        weekly"));
}

#[test]
fn test_profiles_listing() {
    cargo_bin_cmd!("scanlaunch")
        .arg("--profiles")
        .assert()
        .success()
        .stdout(predicate::str::contains("Basic Scan"))
        .stdout(predicate::str::contains("Comprehensive Scan"))
        .stdout(predicate::str::contains("Stealth Scan"));
}

/// Running with no arguments should fail (clap requires a target source).
#[test]
fn test_no_args_shows_error() {
    cargo_bin_cmd!("scanlaunch")
        .assert()
        .failure();
}
