//! Workflow engine implementation.
//!
//! The engine never holds its own copy of the collections; it reads and
//! mutates appointments only through the entity store's operations.

use crate::model::appointment::{
    Appointment, AppointmentStatus, AppointmentType, AppointmentValidationError,
};
use crate::model::pet::{Pet, PetValidationError};
use crate::model::user::{User, UserRole, UserValidationError};
use crate::repo::state_repo::StateRepository;
use crate::store::app_store::{AppStore, AppointmentDraft, PetDraft};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Refusal reasons reported synchronously to the caller.
///
/// Every variant leaves the store untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowError {
    /// No session user; only login/registration may proceed.
    NotAuthenticated,
    /// The actor's role may not perform this operation at all.
    RoleNotPermitted {
        role: UserRole,
        operation: &'static str,
    },
    /// The (from, to) pair is not an edge of the transition graph.
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    /// The transition exists but is reserved for other roles.
    TransitionNotPermitted {
        role: UserRole,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    /// Pending appointments may only be withdrawn by their requester.
    NotRequester { appointment_id: String },
    /// Only pending appointments may be withdrawn.
    NotDeletable { status: AppointmentStatus },
    InvalidUser(UserValidationError),
    InvalidPet(PetValidationError),
    InvalidAppointment(AppointmentValidationError),
}

impl Display for WorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "no session user; sign in first"),
            Self::RoleNotPermitted { role, operation } => {
                write!(f, "role {role} may not {operation}")
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "no transition from {from} to {to}")
            }
            Self::TransitionNotPermitted { role, from, to } => {
                write!(f, "role {role} may not move an appointment from {from} to {to}")
            }
            Self::NotRequester { appointment_id } => {
                write!(f, "appointment {appointment_id} belongs to another requester")
            }
            Self::NotDeletable { status } => {
                write!(f, "appointment in status {status} cannot be withdrawn")
            }
            Self::InvalidUser(err) => write!(f, "{err}"),
            Self::InvalidPet(err) => write!(f, "{err}"),
            Self::InvalidAppointment(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidUser(err) => Some(err),
            Self::InvalidPet(err) => Some(err),
            Self::InvalidAppointment(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UserValidationError> for WorkflowError {
    fn from(value: UserValidationError) -> Self {
        Self::InvalidUser(value)
    }
}

impl From<PetValidationError> for WorkflowError {
    fn from(value: PetValidationError) -> Self {
        Self::InvalidPet(value)
    }
}

impl From<AppointmentValidationError> for WorkflowError {
    fn from(value: AppointmentValidationError) -> Self {
        Self::InvalidAppointment(value)
    }
}

/// Roles allowed to drive the (from, to) transition.
///
/// An empty slice means the pair is not an edge of the graph at all.
pub fn allowed_roles(from: AppointmentStatus, to: AppointmentStatus) -> &'static [UserRole] {
    use AppointmentStatus::{Cancelled, Completed, PendingApproval, Rejected, Scheduled};
    use UserRole::{Admin, Customer, Veterinarian};

    match (from, to) {
        (PendingApproval, Scheduled) => &[Veterinarian, Admin],
        (PendingApproval, Rejected) => &[Veterinarian, Admin],
        (Scheduled, Completed) => &[Veterinarian],
        (Scheduled, Cancelled) => &[Customer, Veterinarian, Admin],
        _ => &[],
    }
}

/// Whether a virtual-visit join capability is exposed for `appointment`.
///
/// This is the single authority for that decision.
pub fn is_joinable(appointment: &Appointment) -> bool {
    appointment.status == AppointmentStatus::Scheduled
        && appointment.kind == AppointmentType::Virtual
}

/// Pet registration input as issued by a view; the owner is the actor.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterPetRequest {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: u32,
    pub weight: f64,
    pub image: String,
}

/// Appointment booking input as issued by a customer view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentRequest {
    pub pet_id: String,
    pub vet_id: String,
    pub date: String,
    pub time: String,
    pub kind: AppointmentType,
    pub reason: String,
}

/// Validated mutation surface over an [`AppStore`].
///
/// Holds the store exclusively for the duration of an intent, so no other
/// caller can observe intermediate state.
pub struct WorkflowEngine<'store, R: StateRepository> {
    store: &'store mut AppStore<R>,
}

impl<'store, R: StateRepository> WorkflowEngine<'store, R> {
    pub fn new(store: &'store mut AppStore<R>) -> Self {
        Self { store }
    }

    /// Registers a pet owned by the current session user.
    pub fn register_pet(&mut self, request: RegisterPetRequest) -> WorkflowResult<Pet> {
        let actor = self.actor()?;
        let draft = PetDraft {
            owner_id: actor.id.clone(),
            name: request.name,
            species: request.species,
            breed: request.breed,
            age: request.age,
            weight: request.weight,
            image: request.image,
            last_visit: None,
        };
        Ok(self.store.create_pet(draft)?)
    }

    /// Books an appointment request on behalf of the current customer.
    ///
    /// The created appointment always starts in `PENDING_APPROVAL`.
    pub fn request_appointment(
        &mut self,
        request: AppointmentRequest,
    ) -> WorkflowResult<Appointment> {
        let actor = self.actor()?;
        if actor.role != UserRole::Customer {
            return Err(WorkflowError::RoleNotPermitted {
                role: actor.role,
                operation: "request an appointment",
            });
        }

        let draft = AppointmentDraft {
            pet_id: request.pet_id,
            vet_id: request.vet_id,
            date: request.date,
            time: request.time,
            kind: request.kind,
            status: AppointmentStatus::PendingApproval,
            reason: request.reason,
        };
        let appointment = self.store.create_appointment(draft)?;
        info!(
            "event=appointment_request module=workflow status=ok id={} pet_id={}",
            appointment.id, appointment.pet_id
        );
        Ok(appointment)
    }

    /// Moves the appointment with `id` to `to` when the transition table
    /// allows it for the actor's role.
    ///
    /// Unknown ids are a no-op, matching the store's not-found policy.
    pub fn update_status(&mut self, id: &str, to: AppointmentStatus) -> WorkflowResult<()> {
        let actor_role = self.actor()?.role;
        let Some(appointment) = self.store.appointment(id) else {
            return Ok(());
        };
        let from = appointment.status;

        if !from.can_transition(to) {
            return Err(WorkflowError::InvalidTransition { from, to });
        }
        if !allowed_roles(from, to).contains(&actor_role) {
            return Err(WorkflowError::TransitionNotPermitted {
                role: actor_role,
                from,
                to,
            });
        }

        self.store.update_appointment_status(id, to);
        info!(
            "event=appointment_transition module=workflow status=ok id={id} from={from} to={to} role={actor_role}"
        );
        Ok(())
    }

    /// Withdraws a pending appointment request.
    ///
    /// Only the requester (a customer owning the appointment's pet) may
    /// withdraw, and only while the request is still pending. Unknown ids
    /// are a no-op, making repeated deletes idempotent.
    pub fn delete_appointment(&mut self, id: &str) -> WorkflowResult<()> {
        let actor = self.actor()?.clone();
        let Some(appointment) = self.store.appointment(id) else {
            return Ok(());
        };
        let status = appointment.status;
        let pet_id = appointment.pet_id.clone();

        if status != AppointmentStatus::PendingApproval {
            return Err(WorkflowError::NotDeletable { status });
        }
        if actor.role != UserRole::Customer {
            return Err(WorkflowError::RoleNotPermitted {
                role: actor.role,
                operation: "withdraw an appointment request",
            });
        }
        // Ownership is resolved through the pet; ids pointing at no stored
        // pet stay deletable (the store does not enforce referential
        // integrity for owner references).
        if let Some(pet) = self.store.pet(&pet_id) {
            if pet.owner_id != actor.id {
                return Err(WorkflowError::NotRequester {
                    appointment_id: id.to_string(),
                });
            }
        }

        self.store.delete_appointment(id);
        info!("event=appointment_withdraw module=workflow status=ok id={id}");
        Ok(())
    }

    /// Appointments currently exposing a virtual-visit join capability.
    pub fn joinable_consultations(&self) -> Vec<&Appointment> {
        self.store
            .appointments()
            .iter()
            .filter(|appointment| is_joinable(appointment))
            .collect()
    }

    fn actor(&self) -> WorkflowResult<&User> {
        self.store
            .current_user()
            .ok_or(WorkflowError::NotAuthenticated)
    }
}
