use petpulse_core::db::open_db_in_memory;
use petpulse_core::{
    AppStore, AppointmentDraft, AppointmentStatus, AppointmentType, PetDraft, PetValidationError,
    SqliteStateRepository, UserRole,
};
use rusqlite::Connection;

fn hydrate(conn: &Connection) -> AppStore<SqliteStateRepository<'_>> {
    let repo = SqliteStateRepository::try_new(conn).expect("repo init");
    AppStore::hydrate(repo).expect("hydrate")
}

fn pet_draft(name: &str) -> PetDraft {
    PetDraft {
        owner_id: "c1".to_string(),
        name: name.to_string(),
        species: "Dog".to_string(),
        breed: "Beagle".to_string(),
        age: 2,
        weight: 11.3,
        image: "https://example.test/beagle.jpg".to_string(),
        last_visit: Some("2024-04-01".to_string()),
    }
}

fn appointment_draft(reason: &str) -> AppointmentDraft {
    AppointmentDraft {
        pet_id: "p1".to_string(),
        vet_id: "v1".to_string(),
        date: "2024-06-12".to_string(),
        time: "02:00 PM".to_string(),
        kind: AppointmentType::Virtual,
        status: AppointmentStatus::PendingApproval,
        reason: reason.to_string(),
    }
}

#[test]
fn first_run_seeds_pets_and_appointments_but_no_user() {
    let conn = open_db_in_memory().unwrap();
    let store = hydrate(&conn);

    assert!(store.current_user().is_none());

    let names: Vec<&str> = store.pets().iter().map(|pet| pet.name.as_str()).collect();
    assert_eq!(names, ["Buddy", "Luna"]);

    let seeded = store.appointment("a1").expect("seeded appointment");
    assert_eq!(seeded.status, AppointmentStatus::Scheduled);
    assert_eq!(seeded.kind, AppointmentType::Virtual);
    assert_eq!(seeded.reason, "Annual Checkup");
}

#[test]
fn create_pet_appends_one_entry_and_preserves_fields_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);
    let before: Vec<String> = store.pets().iter().map(|pet| pet.id.clone()).collect();

    let created = store.create_pet(pet_draft("Rex")).expect("create pet");

    assert_eq!(store.pets().len(), before.len() + 1);
    assert!(!before.contains(&created.id));
    assert_eq!(created.name, "Rex");
    assert_eq!(created.species, "Dog");
    assert_eq!(created.breed, "Beagle");
    assert_eq!(created.age, 2);
    assert_eq!(created.weight, 11.3);
    assert_eq!(created.last_visit.as_deref(), Some("2024-04-01"));

    let second = store.create_pet(pet_draft("Milo")).expect("create pet");
    assert_ne!(created.id, second.id);
}

#[test]
fn create_pet_rejects_blank_name_without_state_change() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);
    let before = store.pets().len();

    let mut draft = pet_draft("x");
    draft.name = "  ".to_string();
    let err = store.create_pet(draft).unwrap_err();

    assert_eq!(err, PetValidationError::EmptyName);
    assert_eq!(store.pets().len(), before);
}

#[test]
fn create_appointment_assigns_fresh_id_and_keeps_submitted_status() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);

    let created = store
        .create_appointment(appointment_draft("Vaccination booster"))
        .expect("create appointment");

    assert_ne!(created.id, "a1");
    assert_eq!(created.status, AppointmentStatus::PendingApproval);
    let loaded = store.appointment(&created.id).expect("created appointment");
    assert_eq!(loaded.reason, "Vaccination booster");
}

#[test]
fn update_appointment_status_is_an_unconditional_write() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);

    // The store does not consult the transition graph; that is the
    // workflow engine's contract.
    store.update_appointment_status("a1", AppointmentStatus::PendingApproval);
    assert_eq!(
        store.appointment("a1").expect("a1").status,
        AppointmentStatus::PendingApproval
    );
}

#[test]
fn update_status_on_unknown_id_is_a_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);
    let before: Vec<_> = store.appointments().to_vec();

    store.update_appointment_status("does-not-exist", AppointmentStatus::Cancelled);

    assert_eq!(store.appointments(), &before[..]);
}

#[test]
fn delete_appointment_removes_and_repeating_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);

    store.delete_appointment("a1");
    assert!(store.appointment("a1").is_none());

    store.delete_appointment("a1");
    assert!(store.appointments().is_empty());
}

#[test]
fn login_installs_demo_identity_and_logout_clears_it() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);

    let user = store.login(UserRole::Veterinarian);
    assert_eq!(user.id, "v1");
    assert_eq!(user.name, "Dr. Sarah Smith");
    assert_eq!(store.current_user().map(|u| u.id.as_str()), Some("v1"));

    store.logout();
    assert!(store.current_user().is_none());
}

#[test]
fn register_assigns_fresh_id_and_derived_avatar() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);

    let user = store
        .register(petpulse_core::RegisterRequest {
            name: "Jane Roe".to_string(),
            email: "jane@example.com".to_string(),
            role: UserRole::Customer,
        })
        .expect("register");

    assert!(user.id.starts_with('u'));
    assert!(user.avatar.contains("dicebear"));
    assert_eq!(store.current_user(), Some(&user));
}

#[test]
fn register_rejects_invalid_email_and_keeps_slot_empty() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);

    let err = store
        .register(petpulse_core::RegisterRequest {
            name: "Jane Roe".to_string(),
            email: "jane-at-example".to_string(),
            role: UserRole::Customer,
        })
        .unwrap_err();

    assert!(matches!(
        err,
        petpulse_core::UserValidationError::InvalidEmail(_)
    ));
    assert!(store.current_user().is_none());
}
