//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `habitkit_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use habitkit_core::db::open_db_in_memory;
use habitkit_core::{calculate_streak, HabitService, SqliteStore, StoreKeys};

fn main() {
    println!("habitkit_core ping={}", habitkit_core::ping());
    println!("habitkit_core version={}", habitkit_core::core_version());

    match smoke_flow() {
        Ok(label) => println!("smoke streak={label}"),
        Err(err) => {
            eprintln!("smoke flow failed: {err}");
            std::process::exit(1);
        }
    }
}

/// Runs one in-memory create/toggle/derive round to prove core wiring.
fn smoke_flow() -> Result<String, Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let store = SqliteStore::try_new(&conn, StoreKeys::default())?;
    let mut service = HabitService::new(store, Some(0));

    let id = service.add_habit("smoke")?.id;
    let habit = service.toggle_completion(id, "2024-01-01")?;
    Ok(calculate_streak(&habit.completions))
}
