//! Appointment workflow: the validated mutation surface over the store.
//!
//! # Responsibility
//! - Enforce the appointment status transition graph and the roles
//!   allowed to drive each transition.
//! - Gate every mutation on the presence of a session user.
//!
//! # Invariants
//! - A transition outside the declared table never reaches the store.
//! - A rejected operation leaves all visible state unchanged.

mod engine;

pub use engine::{
    allowed_roles, is_joinable, AppointmentRequest, RegisterPetRequest, WorkflowEngine,
    WorkflowError, WorkflowResult,
};
