//! timeclock-admin main entrypoint.

use timeclock_admin::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
