#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn tca() -> Command {
    cargo_bin_cmd!("timeclock-admin")
}

/// Paths of one isolated test instance: its own config file, cache
/// database and backup directory, plus the share directory it talks to.
pub struct TestEnv {
    pub root: PathBuf,
    pub config: String,
    pub db: String,
    pub share: String,
    pub backup: String,
}

/// Create a fresh instance directory under the system temp dir, with its
/// own share directory.
pub fn setup_env(name: &str) -> TestEnv {
    let mut root: PathBuf = env::temp_dir();
    root.push(format!("{}_timeclock", name));
    let _ = fs::remove_dir_all(&root);

    let share = root.join("share");
    fs::create_dir_all(&share).expect("create share dir");

    env_at(&root, &share)
}

/// Create a second (or third) instance pointed at an existing share, to
/// simulate multiple admin processes on the same deployment.
pub fn setup_peer_env(name: &str, share: &str) -> TestEnv {
    let mut root: PathBuf = env::temp_dir();
    root.push(format!("{}_timeclock", name));
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(&root).expect("create peer dir");

    env_at(&root, &PathBuf::from(share))
}

fn env_at(root: &PathBuf, share: &PathBuf) -> TestEnv {
    TestEnv {
        root: root.clone(),
        config: root.join("timeclock-admin.conf").to_string_lossy().to_string(),
        db: root.join("cache.sqlite").to_string_lossy().to_string(),
        share: share.to_string_lossy().to_string(),
        backup: root.join("backups").to_string_lossy().to_string(),
    }
}

/// Run `init` for the given instance.
pub fn init_env(env: &TestEnv) {
    tca()
        .args([
            "--config",
            &env.config,
            "init",
            "--share",
            &env.share,
            "--db",
            &env.db,
            "--backup",
            &env.backup,
        ])
        .assert()
        .success();
}

/// Shorthand: a command already pointed at this instance's config.
pub fn tca_for(env: &TestEnv) -> Command {
    let mut cmd = tca();
    cmd.args(["--config", &env.config]);
    cmd
}

pub const CARD_A: &str = "aaaa0000000001";
pub const CARD_B: &str = "bbbb0000000002";

/// Add a standard employee with an 8-hour schedule.
pub fn add_employee(env: &TestEnv, name: &str, card: &str) {
    tca_for(env)
        .args(["employee", "add", name, card, "--hours", "8"])
        .assert()
        .success();
}

/// Add one raw clock record through the CLI.
pub fn add_record(env: &TestEnv, card: &str, date: &str, time: &str, kind: &str) {
    tca_for(env)
        .args(["record", "add", card, date, time, kind])
        .assert()
        .success();
}
