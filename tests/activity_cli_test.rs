use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run actman with a clean environment.
fn actman() -> Command {
    let mut cmd = cargo_bin_cmd!("actman");
    cmd.env_remove("ACTMAN_REMOTE_URL")
        .env_remove("ACTMAN_REMOTE_KEY")
        .env_remove("ACTMAN_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn init(dir: &assert_fs::TempDir) {
    actman()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
}

/// Log an activity and return the id printed by `actman add`.
fn add(dir: &assert_fs::TempDir, date: &str, minutes: u32, card: &str, who: &str) -> String {
    let output = actman()
        .current_dir(dir.path())
        .args([
            "add",
            "--date",
            date,
            "--duration",
            &minutes.to_string(),
            "--card",
            card,
            "--responsible",
            who,
            "--description",
            "worked on it",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .find_map(|l| l.trim().strip_prefix("id: ").map(str::to_string))
        .expect("add prints the new id")
}

// ─── init ────────────────────────────────────────────────────────

#[test]
fn init_creates_config() {
    let dir = assert_fs::TempDir::new().unwrap();

    actman()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created .actman/"))
        .stdout(predicate::str::contains("config.toml"));

    dir.child(".actman/config.toml")
        .assert(predicate::str::contains("backend = \"local\""));
}

#[test]
fn init_twice_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    actman()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn commands_without_init_fail() {
    let dir = assert_fs::TempDir::new().unwrap();

    actman()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn custom_config_directory() {
    let dir = assert_fs::TempDir::new().unwrap();

    actman()
        .current_dir(dir.path())
        .args(["--config", "timesheet", "init"])
        .assert()
        .success();
    dir.child("timesheet/config.toml")
        .assert(predicate::path::exists());

    actman()
        .current_dir(dir.path())
        .args(["--config", "timesheet", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend: local"));
}

// ─── add / list ──────────────────────────────────────────────────

#[test]
fn add_then_list_newest_first() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    add(&dir, "2024-01-01", 30, "AB-1", "Alice");
    add(&dir, "2024-01-02", 15, "CD-2", "Bob");

    let output = actman()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Activities (2)"))
        .stdout(predicate::str::contains("Page 1 of 1"))
        .stdout(predicate::str::contains("45m"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let bob = text.find("CD-2").unwrap();
    let alice = text.find("AB-1").unwrap();
    assert!(bob < alice, "newer activity should be listed first");

    dir.child(".actman/activities.json")
        .assert(predicate::str::contains("\"card_number\": \"AB-1\""));
}

#[test]
fn add_rejects_zero_duration() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    actman()
        .current_dir(dir.path())
        .args([
            "add",
            "--duration",
            "0",
            "--card",
            "AB-1",
            "--responsible",
            "Alice",
            "--description",
            "x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive number of minutes"));

    dir.child(".actman/activities.json")
        .assert(predicate::path::missing());
}

#[test]
fn add_requires_card() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    actman()
        .current_dir(dir.path())
        .args(["add", "--duration", "10", "--responsible", "A", "--description", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--card is required"));
}

#[test]
fn add_rejects_malformed_date() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    actman()
        .current_dir(dir.path())
        .args(["add", "--date", "02/01/2024", "--duration", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn list_filters_by_date_and_responsible() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add(&dir, "2024-01-01", 30, "AB-1", "Alice");
    add(&dir, "2024-01-02", 15, "CD-2", "Bob");

    actman()
        .current_dir(dir.path())
        .args(["list", "--from", "2024-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CD-2"))
        .stdout(predicate::str::contains("AB-1").not());

    actman()
        .current_dir(dir.path())
        .args(["list", "--responsible", "ali"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AB-1"))
        .stdout(predicate::str::contains("CD-2").not());
}

#[test]
fn list_with_no_match_suggests_removing_filters() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add(&dir, "2024-01-01", 30, "AB-1", "Alice");

    actman()
        .current_dir(dir.path())
        .args(["list", "--card", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No activities found"))
        .stdout(predicate::str::contains("removing filters"));
}

#[test]
fn filtered_page_past_the_end_names_the_page() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add(&dir, "2024-01-01", 30, "AB-1", "Alice");
    add(&dir, "2024-01-02", 15, "AB-2", "Alice");

    actman()
        .current_dir(dir.path())
        .args(["list", "--responsible", "ali", "--page", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No activities found"))
        .stdout(predicate::str::contains("Page 3 is past the last page (1)"))
        .stdout(predicate::str::contains("removing filters").not());
}

#[test]
fn list_second_page() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    let rows: Vec<String> = (1..=25)
        .map(|day| {
            format!(
                r#"{{"id":"row-{day:02}","date":"2024-01-{day:02}","duration":10,"description":"d","card_number":"AB-{day}","responsible":"Alice"}}"#
            )
        })
        .collect();
    dir.child(".actman/activities.json")
        .write_str(&format!("[{}]", rows.join(",")))
        .unwrap();

    actman()
        .current_dir(dir.path())
        .args(["list", "--page", "2", "--page-size", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 2 of 2"))
        .stdout(predicate::str::contains("showing 21-25"))
        .stdout(predicate::str::contains("row-05"))
        .stdout(predicate::str::contains("row-06").not());

    actman()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 2"))
        .stdout(predicate::str::contains("actman list --page 2"));
}

#[test]
fn list_page_zero_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    actman()
        .current_dir(dir.path())
        .args(["list", "--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page must be 1 or greater"));
}

#[test]
fn corrupt_store_is_reported() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    dir.child(".actman/activities.json")
        .write_str("{ broken")
        .unwrap();

    actman()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array"));
}

// ─── show / edit / delete ────────────────────────────────────────

#[test]
fn show_prints_all_fields() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    let id = add(&dir, "2024-03-04", 60, "JIRA-9", "Carol");

    actman()
        .current_dir(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("JIRA-9"))
        .stdout(predicate::str::contains("Carol"))
        .stdout(predicate::str::contains("2024-03-04"))
        .stdout(predicate::str::contains("worked on it"));
}

#[test]
fn edit_changes_only_given_fields() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    let id = add(&dir, "2024-01-01", 30, "AB-1", "Alice");

    actman()
        .current_dir(dir.path())
        .args(["edit", &id, "--duration", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    actman()
        .current_dir(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("90"))
        .stdout(predicate::str::contains("AB-1"))
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn edit_missing_id_is_not_found() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add(&dir, "2024-01-01", 30, "AB-1", "Alice");

    actman()
        .current_dir(dir.path())
        .args(["edit", "does-not-exist", "--duration", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn edit_without_fields_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    let id = add(&dir, "2024-01-01", 30, "AB-1", "Alice");

    actman()
        .current_dir(dir.path())
        .args(["edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn delete_with_yes_removes_activity() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    let id = add(&dir, "2024-01-01", 30, "AB-1", "Alice");

    actman()
        .current_dir(dir.path())
        .args(["delete", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted activity"));

    actman()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No activities found"));
}

#[test]
fn delete_declined_keeps_activity() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    let id = add(&dir, "2024-01-01", 30, "AB-1", "Alice");

    actman()
        .current_dir(dir.path())
        .args(["delete", &id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"));

    actman()
        .current_dir(dir.path())
        .args(["show", &id])
        .assert()
        .success();
}

#[test]
fn delete_confirmed_at_prompt() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    let id = add(&dir, "2024-01-01", 30, "AB-1", "Alice");

    actman()
        .current_dir(dir.path())
        .args(["delete", &id])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted activity"));
}

#[test]
fn delete_absent_id_is_a_noop() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);

    actman()
        .current_dir(dir.path())
        .args(["delete", "ghost", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to delete"));
}

// ─── status / quiet ──────────────────────────────────────────────

#[test]
fn status_summarizes_store() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    add(&dir, "2024-01-01", 30, "AB-1", "Alice");
    add(&dir, "2024-01-05", 60, "CD-2", "Bob");

    actman()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend: local"))
        .stdout(predicate::str::contains("2 activities"))
        .stdout(predicate::str::contains("From 2024-01-01 to 2024-01-05"))
        .stdout(predicate::str::contains("1h 30m"));
}

#[test]
fn quiet_suppresses_success_messages() {
    let dir = assert_fs::TempDir::new().unwrap();
    init(&dir);
    let id = add(&dir, "2024-01-01", 30, "AB-1", "Alice");

    actman()
        .current_dir(dir.path())
        .args(["-q", "delete", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
