use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn authscan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("authscan").unwrap();
    cmd.env("DATABASE_URL", format!("sqlite:///{}", dir.path().join("serials.db").display()))
        .env_remove("TESTING")
        .env_remove("AUTHSCAN_SEED_CSV")
        .current_dir(dir.path());
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("authscan").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Product authenticity verification"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("authscan").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_verify_unknown_on_empty_registry() {
    let dir = TempDir::new().unwrap();
    authscan(&dir)
        .args(["verify", "FAKE1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fake or Unknown Product"))
        .stdout(predicate::str::contains("\"valid\": false"));
}

#[test]
fn test_cli_seed_then_verify_twice() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("codes.csv");
    std::fs::write(&csv, "serial_number,used\nIMPORT1,0\nIMPORT2,1\n").unwrap();

    authscan(&dir)
        .arg("seed")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"inserted\": 2"));

    authscan(&dir)
        .args(["verify", " import1 "])
        .assert()
        .success()
        .stdout(predicate::str::contains("first scan"))
        .stdout(predicate::str::contains("\"valid\": true"));

    authscan(&dir)
        .args(["verify", "IMPORT1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already used"));

    authscan(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 2"))
        .stdout(predicate::str::contains("\"used\": 2"));
}

#[test]
fn test_cli_seed_twice_is_noop() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("codes.csv");
    std::fs::write(&csv, "serial_number\nA1\n").unwrap();

    authscan(&dir).arg("seed").arg("--csv").arg(&csv).assert().success();
    authscan(&dir)
        .arg("seed")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped_non_empty"));
}

#[test]
fn test_cli_rejects_unsupported_database_url() {
    let dir = TempDir::new().unwrap();
    authscan(&dir)
        .env("DATABASE_URL", "mysql://localhost/serials")
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported database URL scheme"));
}
