//! Core domain logic for PetPulse.
//! This crate is the single source of truth for business invariants.

pub mod assistant;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;
pub mod workflow;

pub use assistant::{
    assist_diagnosis, assistant_reply, check_symptoms, AssistantClient, AssistantError,
    AssistantResult, ChatMode, ChatRole, ChatTurn, ASSISTANT_FALLBACK, DIAGNOSIS_ASSIST_FALLBACK,
    SYMPTOM_CHECK_FALLBACK,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::appointment::{
    Appointment, AppointmentStatus, AppointmentType, AppointmentValidationError,
};
pub use model::pet::{Pet, PetValidationError};
pub use model::user::{User, UserRole, UserValidationError};
pub use repo::state_repo::{RepoError, RepoResult, SqliteStateRepository, StateRepository};
pub use store::app_store::{AppStore, AppointmentDraft, PetDraft, RegisterRequest};
pub use workflow::{
    allowed_roles, is_joinable, AppointmentRequest, RegisterPetRequest, WorkflowEngine,
    WorkflowError, WorkflowResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
