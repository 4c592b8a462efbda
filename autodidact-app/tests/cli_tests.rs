//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Points both the data dir and the user dirs at `dir` so no real config leaks in.
fn autodidact(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("autodidact").unwrap();
    cmd.env("HOME", dir)
        .env("XDG_DATA_HOME", dir.join("xdg"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn with_cards(dir: &TempDir) {
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "Kerning adjusts pairs. Leading is line spacing. Tracking is overall spacing.").unwrap();
    autodidact(dir.path())
        .args(["cards", "generate"])
        .arg(&notes)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 5 flashcards to project default"));
}

#[test]
fn generate_build_and_due() {
    let dir = TempDir::new().unwrap();
    with_cards(&dir);

    autodidact(dir.path())
        .args(["queue", "build", "--start", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("queue has 25 entries starting 2024-01-01"));

    autodidact(dir.path())
        .args(["queue", "due", "--date", "2024-01-08"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cards due on 2024-01-08:"))
        .stdout(predicate::str::contains("5. "));

    autodidact(dir.path())
        .args(["queue", "due", "--date", "2024-01-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards due on 2024-01-03."));

    autodidact(dir.path())
        .args(["queue", "due", "--date", "2024-01-08", "--grep", "kerning"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "))
        .stdout(predicate::str::contains("2. ").not());

    let queue = dir.path().join("data/projects/default/spaced_review_queue.json");
    assert!(queue.is_file());
}

#[test]
fn second_build_keeps_existing_queue() {
    let dir = TempDir::new().unwrap();
    with_cards(&dir);
    autodidact(dir.path())
        .args(["queue", "build", "--start", "2024-01-01"])
        .assert()
        .success();
    autodidact(dir.path())
        .args(["queue", "build", "--start", "2024-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("queue already exists for project default"));
    autodidact(dir.path())
        .args(["queue", "build", "--start", "2024-06-01", "--rebuild"])
        .assert()
        .success()
        .stdout(predicate::str::contains("queue has 25 entries starting 2024-06-01"));
}

#[test]
fn due_without_queue_is_empty() {
    let dir = TempDir::new().unwrap();
    autodidact(dir.path())
        .args(["queue", "due", "--date", "2024-01-08"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cards due on 2024-01-08."));
}

#[test]
fn build_without_flashcards_fails() {
    let dir = TempDir::new().unwrap();
    autodidact(dir.path())
        .args(["queue", "build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found: flashcards"));
}

#[test]
fn malformed_queue_is_reported() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("data/projects/default");
    std::fs::create_dir_all(&project).unwrap();
    std::fs::write(project.join("spaced_review_queue.json"), "{not json").unwrap();

    autodidact(dir.path())
        .args(["queue", "due", "--date", "2024-01-08"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed queue"));
}

#[test]
fn review_records_answers_for_stats() {
    let dir = TempDir::new().unwrap();
    with_cards(&dir);
    autodidact(dir.path())
        .args(["queue", "build", "--start", "2024-01-01"])
        .assert()
        .success();

    // Show, correct; show, incorrect; then end of input.
    autodidact(dir.path())
        .args(["review", "--date", "2024-01-02"])
        .write_stdin("\ny\n\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/5]"))
        .stdout(predicate::str::contains("reviewed 2"));

    let out = autodidact(dir.path())
        .args(["stats", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["totals"]["total"], 2);
    assert_eq!(v["totals"]["correct"], 1);
    assert_eq!(v["totals"]["incorrect"], 1);

    // Answering does not move cards around.
    autodidact(dir.path())
        .args(["queue", "due", "--date", "2024-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5. "));
}

#[test]
fn config_schedule_is_used() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("autodidact.toml");
    std::fs::write(&config, "[schedule]\noffsets = [2]\n").unwrap();
    with_cards(&dir);

    autodidact(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["queue", "build", "--start", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("queue has 5 entries"));

    autodidact(dir.path())
        .args(["queue", "due", "--date", "2024-01-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cards due on 2024-01-03:"));
}

#[test]
fn bad_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("autodidact.toml");
    std::fs::write(&config, "[schedule]\noffsets = [7, 3]\n").unwrap();

    autodidact(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["queue", "due"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing config"));
}

#[test]
fn focus_rejects_unlisted_length() {
    let dir = TempDir::new().unwrap();
    autodidact(dir.path())
        .args(["focus", "start", "30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn invalid_project_key_rejected() {
    let dir = TempDir::new().unwrap();
    autodidact(dir.path())
        .args(["-p", "../etc", "queue", "due"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn import_csv_then_export() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cards.csv");
    std::fs::write(&input, "question,answer\nWhat is kerning?,Pair spacing\nWhat is leading?,Line spacing\n").unwrap();

    autodidact(dir.path())
        .args(["-p", "typo", "cards", "import", "--csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported 2 flashcards"));

    autodidact(dir.path())
        .args(["-p", "typo", "cards", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("What is leading?"));

    let out = dir.path().join("out.csv");
    autodidact(dir.path())
        .args(["-p", "typo", "cards", "export"])
        .arg(&out)
        .assert()
        .success();
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("question,answer"));
    assert!(text.contains("What is kerning?,Pair spacing"));
}

#[test]
fn generate_from_transcript() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("talk.transcript.json");
    std::fs::write(
        &input,
        r#"{"chunks": [{"title": "Kerning", "lines": ["Pairs of letters."]},
                       {"title": "Leading", "lines": ["Space between lines."]}]}"#,
    )
    .unwrap();

    autodidact(dir.path())
        .args(["-p", "talk", "cards", "generate", "--transcript"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 10 flashcards to project talk"));

    autodidact(dir.path())
        .args(["-p", "talk", "cards", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Space between lines"));

    std::fs::write(&input, "plain text, not json").unwrap();
    autodidact(dir.path())
        .args(["-p", "talk", "cards", "generate", "--transcript"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing transcript"));
}

#[test]
fn oversized_upcoming_window_fails() {
    let dir = TempDir::new().unwrap();
    autodidact(dir.path())
        .args(["queue", "upcoming", "--days", "4294967295"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}
