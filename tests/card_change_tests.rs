//! End-to-end card-id change: dataset, roster file and day-file
//! propagation.

use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{CARD_A, CARD_B, add_employee, add_record, init_env, setup_env, tca_for};

const NEW_CARD: &str = "cccc0000000003";

#[test]
fn test_change_card_id_propagates_everywhere() {
    let env = setup_env("card_change");
    init_env(&env);
    add_employee(&env, "Ana Novak", CARD_A);
    add_employee(&env, "Bor Kos", CARD_B);

    add_record(&env, CARD_A, "2025-09-01", "08:00", "arrival");
    add_record(&env, CARD_A, "2025-09-02", "08:00", "arrival");
    add_record(&env, CARD_B, "2025-09-03", "08:00", "arrival");

    tca_for(&env)
        .args([
            "special", "set", CARD_A, "vacation", "--period", "2025-09-05",
        ])
        .assert()
        .success();

    tca_for(&env)
        .args(["employee", "change-card", CARD_A, NEW_CARD])
        .assert()
        .success()
        .stdout(contains("2 day-file(s) updated"));

    // Dataset: only the new id resolves.
    tca_for(&env)
        .args(["employee", "list"])
        .assert()
        .success()
        .stdout(contains(NEW_CARD));

    // Roster: rewritten with the new id.
    let roster = fs::read_to_string(Path::new(&env.share).join("worker_id.csv"))
        .expect("roster file");
    assert!(roster.contains(&format!("Ana Novak;{NEW_CARD}")));
    assert!(!roster.contains(CARD_A));

    // Day-files: old id textually replaced, other cards untouched.
    let day1 = fs::read_to_string(Path::new(&env.share).join("time_records_20250901.csv"))
        .expect("day file");
    assert!(day1.contains(NEW_CARD));
    assert!(!day1.contains(CARD_A));

    let day3 = fs::read_to_string(Path::new(&env.share).join("time_records_20250903.csv"))
        .expect("day file");
    assert!(day3.contains(CARD_B));

    // Special days follow the employee to the new id.
    tca_for(&env)
        .args(["special", "list", NEW_CARD])
        .assert()
        .success()
        .stdout(contains("2025-09-05"));

    // Changing to an id that is already taken is rejected.
    tca_for(&env)
        .args(["employee", "change-card", NEW_CARD, CARD_B])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}
