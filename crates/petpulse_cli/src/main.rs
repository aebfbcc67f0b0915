//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `petpulse_core` linkage.
//! - Hydrate an in-memory store so the seed path is exercised without
//!   touching any on-disk state.

use petpulse_core::db::open_db_in_memory;
use petpulse_core::{AppStore, SqliteStateRepository};

fn main() {
    println!("petpulse_core ping={}", petpulse_core::ping());
    println!("petpulse_core version={}", petpulse_core::core_version());

    let probe = open_db_in_memory()
        .map_err(|err| err.to_string())
        .and_then(|conn| {
            let repo = SqliteStateRepository::try_new(&conn).map_err(|err| err.to_string())?;
            let store = AppStore::hydrate(repo).map_err(|err| err.to_string())?;
            Ok((store.pets().len(), store.appointments().len()))
        });

    match probe {
        Ok((pets, appointments)) => {
            println!("petpulse_core seed pets={pets} appointments={appointments}");
        }
        Err(err) => {
            eprintln!("petpulse_core probe failed: {err}");
            std::process::exit(1);
        }
    }
}
