//! Domain model for the PetPulse core.
//!
//! # Responsibility
//! - Define the canonical records held by the entity store: session user,
//!   pets and appointments.
//! - Keep the status/role/type vocabularies closed enums with explicit
//!   parse/label mappings.
//!
//! # Invariants
//! - Every record is identified by an opaque string id that is stable for
//!   its lifetime and never reused.
//! - Serialized field spelling matches the persisted state layout
//!   (camelCase fields, SCREAMING_SNAKE_CASE enum tags).

pub mod appointment;
pub mod pet;
pub mod user;
