use petpulse_core::db::migrations::latest_version;
use petpulse_core::db::{open_db, open_db_in_memory};
use petpulse_core::repo::state_repo::{STATE_KEY_PETS, STATE_KEY_USER};
use petpulse_core::{
    AppStore, AppointmentDraft, AppointmentStatus, AppointmentType, PetDraft, RepoError,
    SqliteStateRepository, UserRole,
};
use rusqlite::Connection;

fn hydrate(conn: &Connection) -> AppStore<SqliteStateRepository<'_>> {
    let repo = SqliteStateRepository::try_new(conn).expect("repo init");
    AppStore::hydrate(repo).expect("hydrate")
}

#[test]
fn collections_and_user_survive_rehydration_element_wise() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);

    let user = store.login(UserRole::Customer);
    store
        .create_pet(PetDraft {
            owner_id: user.id.clone(),
            name: "Rex".to_string(),
            species: "Dog".to_string(),
            breed: "Beagle".to_string(),
            age: 2,
            weight: 11.3,
            image: "https://example.test/rex.jpg".to_string(),
            last_visit: Some("2024-04-01".to_string()),
        })
        .expect("create pet");
    store
        .create_appointment(AppointmentDraft {
            pet_id: "p1".to_string(),
            vet_id: "v1".to_string(),
            date: "2024-06-12".to_string(),
            time: "02:00 PM".to_string(),
            kind: AppointmentType::InPerson,
            status: AppointmentStatus::PendingApproval,
            reason: "Skin rash".to_string(),
        })
        .expect("create appointment");

    let pets_before = store.pets().to_vec();
    let appointments_before = store.appointments().to_vec();
    let user_before = store.current_user().cloned();
    drop(store);

    let restored = hydrate(&conn);
    assert_eq!(restored.pets(), &pets_before[..]);
    assert_eq!(restored.appointments(), &appointments_before[..]);
    assert_eq!(restored.current_user().cloned(), user_before);
}

#[test]
fn state_survives_closing_and_reopening_the_database_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("petpulse_state.sqlite3");

    let pets_before;
    let appointments_before;
    {
        let conn = open_db(&db_path).expect("open db");
        let mut store = hydrate(&conn);
        store.login(UserRole::Veterinarian);
        store.update_appointment_status("a1", AppointmentStatus::Completed);
        pets_before = store.pets().to_vec();
        appointments_before = store.appointments().to_vec();
    }

    let conn = open_db(&db_path).expect("reopen db");
    let restored = hydrate(&conn);
    assert_eq!(restored.pets(), &pets_before[..]);
    assert_eq!(restored.appointments(), &appointments_before[..]);
    assert_eq!(
        restored.current_user().map(|user| user.id.as_str()),
        Some("v1")
    );
    assert_eq!(
        restored.appointment("a1").expect("a1").status,
        AppointmentStatus::Completed
    );
}

#[test]
fn emptied_collection_stays_empty_instead_of_being_reseeded() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);

    store.delete_appointment("a1");
    assert!(store.appointments().is_empty());
    drop(store);

    let restored = hydrate(&conn);
    assert!(restored.appointments().is_empty());
    // The pet slot was untouched and keeps its seeded entries.
    assert_eq!(restored.pets().len(), 2);
}

#[test]
fn logout_removes_the_persisted_user_row_entirely() {
    let conn = open_db_in_memory().unwrap();
    let mut store = hydrate(&conn);

    store.login(UserRole::Admin);
    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM app_state WHERE key = ?1;",
            [STATE_KEY_USER],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);

    store.logout();
    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM app_state WHERE key = ?1;",
            [STATE_KEY_USER],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 0);
    drop(store);

    assert!(hydrate(&conn).current_user().is_none());
}

#[test]
fn corrupt_persisted_blob_is_rejected_not_masked() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, 'not json');",
        [STATE_KEY_PETS],
    )
    .unwrap();

    let repo = SqliteStateRepository::try_new(&conn).expect("repo init");
    let err = AppStore::hydrate(repo).expect_err("corrupt blob must fail hydration");
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteStateRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_state_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteStateRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("app_state"))
    ));
}

#[test]
fn repository_rejects_state_table_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE app_state (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteStateRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "app_state",
            column: "updated_at",
        })
    ));
}
