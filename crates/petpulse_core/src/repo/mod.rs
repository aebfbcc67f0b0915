//! Persistence adapter between in-memory state and the key/value store.
//!
//! # Responsibility
//! - Define the slot-oriented persistence contract for the entity store.
//! - Isolate SQL and serialization details from store/workflow code.
//!
//! # Invariants
//! - Each slot is saved by whole-value overwrite, never patched.
//! - An absent slot is distinct from a present-but-empty collection.

pub mod state_repo;
