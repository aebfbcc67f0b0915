//! Entity store: the authoritative in-memory holder of application state.
//!
//! # Responsibility
//! - Own the session user, pet and appointment collections for the
//!   lifetime of the process.
//! - Persist every mutation through the state repository, best-effort.
//!
//! # Invariants
//! - No other component holds a mutable reference to the collections.
//! - In-memory state stays authoritative when a persistence write fails.

pub mod app_store;
pub mod seed;
