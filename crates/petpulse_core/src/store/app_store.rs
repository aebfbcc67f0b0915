//! Entity store over the state repository.
//!
//! # Responsibility
//! - Hydrate the three collections at startup, seeding defaults when a
//!   slot has never been written.
//! - Apply mutations in issuance order and persist after each one.
//!
//! # Invariants
//! - Mutations are synchronous; no operation observes intermediate state.
//! - Persistence failures are logged and absorbed; memory remains the
//!   source of truth for the rest of the process lifetime.
//! - Unknown ids on status update/delete are a silent no-op.

use crate::model::appointment::{
    Appointment, AppointmentStatus, AppointmentType, AppointmentValidationError,
};
use crate::model::pet::{Pet, PetValidationError};
use crate::model::user::{User, UserRole, UserValidationError};
use crate::repo::state_repo::{RepoResult, StateRepository};
use crate::store::seed;
use log::{debug, info, warn};
use uuid::Uuid;

/// Pet creation input; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct PetDraft {
    pub owner_id: String,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: u32,
    pub weight: f64,
    pub image: String,
    pub last_visit: Option<String>,
}

/// Appointment creation input; the store assigns the id. The status is
/// supplied by the caller's workflow intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub pet_id: String,
    pub vet_id: String,
    pub date: String,
    pub time: String,
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    pub reason: String,
}

/// Registration input for a new session user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Authoritative in-memory application state.
///
/// Constructed once per process (or per call site that owns a connection)
/// via [`AppStore::hydrate`]; torn down on drop. Callers read through the
/// borrow accessors and must re-read after any mutation.
#[derive(Debug)]
pub struct AppStore<R: StateRepository> {
    repo: R,
    user: Option<User>,
    pets: Vec<Pet>,
    appointments: Vec<Appointment>,
}

impl<R: StateRepository> AppStore<R> {
    /// Loads all three slots, seeding pet/appointment defaults when a slot
    /// has never been written. The user slot is never seeded.
    ///
    /// # Errors
    /// Propagates repository failures, including corrupt persisted blobs.
    pub fn hydrate(repo: R) -> RepoResult<Self> {
        let user = repo.load_user()?;

        let (pets, pets_seeded) = match repo.load_pets()? {
            Some(pets) => (pets, false),
            None => (seed::default_pets(), true),
        };
        let (appointments, appointments_seeded) = match repo.load_appointments()? {
            Some(appointments) => (appointments, false),
            None => (seed::default_appointments(), true),
        };

        let store = Self {
            repo,
            user,
            pets,
            appointments,
        };
        if pets_seeded {
            store.persist_pets();
        }
        if appointments_seeded {
            store.persist_appointments();
        }

        info!(
            "event=store_hydrate module=store status=ok pets={} appointments={} authenticated={} seeded={}",
            store.pets.len(),
            store.appointments.len(),
            store.user.is_some(),
            pets_seeded || appointments_seeded
        );
        Ok(store)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn pet(&self, id: &str) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id == id)
    }

    pub fn appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments
            .iter()
            .find(|appointment| appointment.id == id)
    }

    /// Replaces or clears the session user.
    ///
    /// Clearing removes the persisted slot entirely rather than writing an
    /// empty record.
    pub fn set_current_user(&mut self, user: Option<User>) {
        self.user = user;
        self.persist_user();
    }

    /// Installs the fixed demo identity for `role` as the session user.
    pub fn login(&mut self, role: UserRole) -> User {
        let user = seed::demo_user(role);
        info!(
            "event=session_login module=store status=ok role={} user_id={}",
            user.role, user.id
        );
        self.user = Some(user.clone());
        self.persist_user();
        user
    }

    /// Registers a new user and installs it as the session user.
    ///
    /// Assigns a fresh id and derives an avatar from the display name.
    pub fn register(&mut self, request: RegisterRequest) -> Result<User, UserValidationError> {
        let user = User {
            id: fresh_id('u'),
            avatar: format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
                request.name
            ),
            name: request.name,
            email: request.email,
            role: request.role,
        };
        user.validate()?;

        info!(
            "event=session_register module=store status=ok role={} user_id={}",
            user.role, user.id
        );
        self.user = Some(user.clone());
        self.persist_user();
        Ok(user)
    }

    /// Clears the session user and removes its persisted slot.
    pub fn logout(&mut self) {
        if let Some(user) = &self.user {
            info!(
                "event=session_logout module=store status=ok user_id={}",
                user.id
            );
        }
        self.set_current_user(None);
    }

    /// Appends a new pet with a fresh unique id and returns it.
    pub fn create_pet(&mut self, draft: PetDraft) -> Result<Pet, PetValidationError> {
        let pet = Pet {
            id: fresh_id('p'),
            owner_id: draft.owner_id,
            name: draft.name,
            species: draft.species,
            breed: draft.breed,
            age: draft.age,
            weight: draft.weight,
            image: draft.image,
            last_visit: draft.last_visit,
        };
        pet.validate()?;

        self.pets.push(pet.clone());
        self.persist_pets();
        Ok(pet)
    }

    /// Appends a new appointment with a fresh unique id and returns it.
    pub fn create_appointment(
        &mut self,
        draft: AppointmentDraft,
    ) -> Result<Appointment, AppointmentValidationError> {
        let appointment = Appointment {
            id: fresh_id('a'),
            pet_id: draft.pet_id,
            vet_id: draft.vet_id,
            date: draft.date,
            time: draft.time,
            kind: draft.kind,
            status: draft.status,
            reason: draft.reason,
        };
        appointment.validate()?;

        self.appointments.push(appointment.clone());
        self.persist_appointments();
        Ok(appointment)
    }

    /// Unconditionally writes `status` on the appointment with `id`.
    ///
    /// The transition graph is not checked here; the workflow engine is
    /// the validated entry point. Unknown ids are a silent no-op.
    pub fn update_appointment_status(&mut self, id: &str, status: AppointmentStatus) {
        let Some(appointment) = self
            .appointments
            .iter_mut()
            .find(|appointment| appointment.id == id)
        else {
            debug!("event=appointment_update module=store status=noop id={id}");
            return;
        };

        appointment.status = status;
        self.persist_appointments();
    }

    /// Removes the appointment with `id`; unknown ids are a silent no-op.
    pub fn delete_appointment(&mut self, id: &str) {
        let before = self.appointments.len();
        self.appointments.retain(|appointment| appointment.id != id);
        if self.appointments.len() == before {
            debug!("event=appointment_delete module=store status=noop id={id}");
            return;
        }
        self.persist_appointments();
    }

    fn persist_user(&self) {
        let result = match &self.user {
            Some(user) => self.repo.save_user(user),
            None => self.repo.clear_user(),
        };
        if let Err(err) = result {
            warn!("event=persist module=store status=error slot=user error={err}");
        }
    }

    fn persist_pets(&self) {
        if let Err(err) = self.repo.save_pets(&self.pets) {
            warn!("event=persist module=store status=error slot=pets error={err}");
        }
    }

    fn persist_appointments(&self) {
        if let Err(err) = self.repo.save_appointments(&self.appointments) {
            warn!("event=persist module=store status=error slot=appointments error={err}");
        }
    }
}

fn fresh_id(prefix: char) -> String {
    format!("{prefix}{}", Uuid::new_v4().simple())
}
