//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the shell via FRB.
//! - Keep error semantics simple: envelopes with `ok` and a message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every mutation persists before returning, so each call may rehydrate
//!   the store from the state database and still observe all prior calls.

use log::warn;
use petpulse_core::db::open_db;
use petpulse_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, is_joinable,
    ping as ping_inner, AppStore, Appointment, AppointmentRequest, AppointmentStatus,
    AppointmentType, Pet, RegisterPetRequest, RegisterRequest, SqliteStateRepository, User,
    UserRole, WorkflowEngine,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const STATE_DB_FILE_NAME: &str = "petpulse_state.sqlite3";
static STATE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Session user as shown by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Role label (`CUSTOMER|VETERINARIAN|ADMIN`).
    pub role: String,
    pub avatar: String,
}

/// Pet profile as shown by the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct PetRecord {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: u32,
    pub weight: f64,
    pub image: String,
    pub last_visit: Option<String>,
}

/// Appointment as shown by the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRecord {
    pub id: String,
    pub pet_id: String,
    pub vet_id: String,
    pub date: String,
    pub time: String,
    /// Type label (`VIRTUAL|IN_PERSON`).
    pub kind: String,
    /// Status label (`PENDING_APPROVAL|SCHEDULED|REJECTED|COMPLETED|CANCELLED`).
    pub status: String,
    pub reason: String,
    /// Whether the virtual-visit join capability is exposed.
    pub joinable: bool,
}

/// Generic action envelope for mutation calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Created or affected record id, when one applies.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Session envelope for login/register/current-user calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub ok: bool,
    pub user: Option<UserRecord>,
    pub message: String,
}

impl SessionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            user: None,
            message: message.into(),
        }
    }
}

/// List envelope for pet reads.
#[derive(Debug, Clone, PartialEq)]
pub struct PetListResponse {
    pub items: Vec<PetRecord>,
    pub message: String,
}

/// List envelope for appointment reads.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentListResponse {
    pub items: Vec<AppointmentRecord>,
    pub message: String,
}

/// Signs in with the fixed demo identity for `role`.
#[flutter_rust_bridge::frb(sync)]
pub fn login(role: String) -> SessionResponse {
    let Some(role) = UserRole::parse(role.as_str()) else {
        return SessionResponse::failure(format!("unknown role `{role}`"));
    };
    match with_store(|store| store.login(role)) {
        Ok(user) => SessionResponse {
            ok: true,
            user: Some(to_user_record(&user)),
            message: "Signed in.".to_string(),
        },
        Err(err) => SessionResponse::failure(format!("login failed: {err}")),
    }
}

/// Registers a new user and signs it in.
#[flutter_rust_bridge::frb(sync)]
pub fn register(name: String, email: String, role: String) -> SessionResponse {
    let Some(role) = UserRole::parse(role.as_str()) else {
        return SessionResponse::failure(format!("unknown role `{role}`"));
    };
    let request = RegisterRequest { name, email, role };
    match with_store(|store| store.register(request)) {
        Ok(Ok(user)) => SessionResponse {
            ok: true,
            user: Some(to_user_record(&user)),
            message: "Account created.".to_string(),
        },
        Ok(Err(err)) => SessionResponse::failure(format!("register failed: {err}")),
        Err(err) => SessionResponse::failure(format!("register failed: {err}")),
    }
}

/// Signs the current user out; the persisted session slot is removed.
#[flutter_rust_bridge::frb(sync)]
pub fn logout() -> ActionResponse {
    match with_store(|store| store.logout()) {
        Ok(()) => ActionResponse::success("Signed out.", None),
        Err(err) => ActionResponse::failure(format!("logout failed: {err}")),
    }
}

/// Returns the current session user, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn current_user() -> SessionResponse {
    match with_store(|store| store.current_user().map(to_user_record)) {
        Ok(user) => {
            let message = if user.is_some() {
                "Session active.".to_string()
            } else {
                "No session.".to_string()
            };
            SessionResponse {
                ok: true,
                user,
                message,
            }
        }
        Err(err) => SessionResponse::failure(format!("current_user failed: {err}")),
    }
}

/// Lists all pets.
#[flutter_rust_bridge::frb(sync)]
pub fn list_pets() -> PetListResponse {
    match with_store(|store| store.pets().iter().map(to_pet_record).collect::<Vec<_>>()) {
        Ok(items) => {
            let message = format!("Found {} pet(s).", items.len());
            PetListResponse { items, message }
        }
        Err(err) => PetListResponse {
            items: Vec::new(),
            message: format!("list_pets failed: {err}"),
        },
    }
}

/// Registers a pet owned by the current session user.
#[flutter_rust_bridge::frb(sync)]
pub fn add_pet(
    name: String,
    species: String,
    breed: String,
    age: u32,
    weight: f64,
    image: String,
) -> ActionResponse {
    let request = RegisterPetRequest {
        name,
        species,
        breed,
        age,
        weight,
        image,
    };
    match with_store(|store| WorkflowEngine::new(store).register_pet(request)) {
        Ok(Ok(pet)) => ActionResponse::success("Pet registered.", Some(pet.id)),
        Ok(Err(err)) => ActionResponse::failure(format!("add_pet failed: {err}")),
        Err(err) => ActionResponse::failure(format!("add_pet failed: {err}")),
    }
}

/// Lists all appointments.
#[flutter_rust_bridge::frb(sync)]
pub fn list_appointments() -> AppointmentListResponse {
    match with_store(|store| {
        store
            .appointments()
            .iter()
            .map(to_appointment_record)
            .collect::<Vec<_>>()
    }) {
        Ok(items) => {
            let message = format!("Found {} appointment(s).", items.len());
            AppointmentListResponse { items, message }
        }
        Err(err) => AppointmentListResponse {
            items: Vec::new(),
            message: format!("list_appointments failed: {err}"),
        },
    }
}

/// Books an appointment request for the current customer.
#[flutter_rust_bridge::frb(sync)]
pub fn request_appointment(
    pet_id: String,
    vet_id: String,
    date: String,
    time: String,
    kind: String,
    reason: String,
) -> ActionResponse {
    let Some(kind) = AppointmentType::parse(kind.as_str()) else {
        return ActionResponse::failure(format!("unknown appointment type `{kind}`"));
    };
    let request = AppointmentRequest {
        pet_id,
        vet_id,
        date,
        time,
        kind,
        reason,
    };
    match with_store(|store| WorkflowEngine::new(store).request_appointment(request)) {
        Ok(Ok(appointment)) => {
            ActionResponse::success("Appointment requested.", Some(appointment.id))
        }
        Ok(Err(err)) => ActionResponse::failure(format!("request_appointment failed: {err}")),
        Err(err) => ActionResponse::failure(format!("request_appointment failed: {err}")),
    }
}

/// Applies a status transition as the current session user.
#[flutter_rust_bridge::frb(sync)]
pub fn update_appointment_status(id: String, status: String) -> ActionResponse {
    let Some(status) = AppointmentStatus::parse(status.as_str()) else {
        return ActionResponse::failure(format!("unknown appointment status `{status}`"));
    };
    match with_store(|store| WorkflowEngine::new(store).update_status(&id, status)) {
        Ok(Ok(())) => ActionResponse::success("Appointment updated.", Some(id)),
        Ok(Err(err)) => ActionResponse::failure(format!("update_appointment_status failed: {err}")),
        Err(err) => ActionResponse::failure(format!("update_appointment_status failed: {err}")),
    }
}

/// Withdraws a pending appointment request.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_appointment(id: String) -> ActionResponse {
    match with_store(|store| WorkflowEngine::new(store).delete_appointment(&id)) {
        Ok(Ok(())) => ActionResponse::success("Appointment withdrawn.", Some(id)),
        Ok(Err(err)) => ActionResponse::failure(format!("delete_appointment failed: {err}")),
        Err(err) => ActionResponse::failure(format!("delete_appointment failed: {err}")),
    }
}

/// Lists appointments currently exposing the virtual-visit join capability.
#[flutter_rust_bridge::frb(sync)]
pub fn list_consultations() -> AppointmentListResponse {
    match with_store(|store| {
        store
            .appointments()
            .iter()
            .filter(|appointment| is_joinable(appointment))
            .map(to_appointment_record)
            .collect::<Vec<_>>()
    }) {
        Ok(items) => {
            let message = format!("Found {} joinable consultation(s).", items.len());
            AppointmentListResponse { items, message }
        }
        Err(err) => AppointmentListResponse {
            items: Vec::new(),
            message: format!("list_consultations failed: {err}"),
        },
    }
}

fn resolve_state_db_path() -> PathBuf {
    STATE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("PETPULSE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STATE_DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(
    f: impl FnOnce(&mut AppStore<SqliteStateRepository<'_>>) -> T,
) -> Result<T, String> {
    let db_path = resolve_state_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_store_open module=ffi status=error error={err}");
        format!("state DB open failed: {err}")
    })?;
    let repo = SqliteStateRepository::try_new(&conn)
        .map_err(|err| format!("state repo init failed: {err}"))?;
    let mut store =
        AppStore::hydrate(repo).map_err(|err| format!("state hydrate failed: {err}"))?;
    Ok(f(&mut store))
}

fn to_user_record(user: &User) -> UserRecord {
    UserRecord {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
        avatar: user.avatar.clone(),
    }
}

fn to_pet_record(pet: &Pet) -> PetRecord {
    PetRecord {
        id: pet.id.clone(),
        owner_id: pet.owner_id.clone(),
        name: pet.name.clone(),
        species: pet.species.clone(),
        breed: pet.breed.clone(),
        age: pet.age,
        weight: pet.weight,
        image: pet.image.clone(),
        last_visit: pet.last_visit.clone(),
    }
}

fn to_appointment_record(appointment: &Appointment) -> AppointmentRecord {
    AppointmentRecord {
        id: appointment.id.clone(),
        pet_id: appointment.pet_id.clone(),
        vet_id: appointment.vet_id.clone(),
        date: appointment.date.clone(),
        time: appointment.time.clone(),
        kind: appointment.kind.as_str().to_string(),
        status: appointment.status.as_str().to_string(),
        reason: appointment.reason.clone(),
        joinable: is_joinable(appointment),
    }
}
