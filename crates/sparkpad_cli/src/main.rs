//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `sparkpad_core` wiring:
//!   opens a database (file path from the first argument, otherwise
//!   in-memory) and reports the applied schema version.

use sparkpad_core::db::{migrations::latest_version, open_db, open_db_in_memory};

fn main() {
    println!("sparkpad_core version={}", sparkpad_core::core_version());

    let result = match std::env::args().nth(1) {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };

    match result {
        Ok(_) => println!("database bootstrap=ok schema_version={}", latest_version()),
        Err(err) => {
            eprintln!("database bootstrap=error {err}");
            std::process::exit(1);
        }
    }
}
