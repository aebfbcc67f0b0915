//! State repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map the three state collections onto fixed keys in `app_state`.
//! - Reject invalid persisted blobs instead of masking them.
//!
//! # Invariants
//! - The three slot keys are fixed and distinct.
//! - Saves overwrite the slot in full; clearing the user slot removes the
//!   row entirely rather than writing an empty record.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::appointment::Appointment;
use crate::model::pet::Pet;
use crate::model::user::User;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key for the current session user.
pub const STATE_KEY_USER: &str = "petpulse_user";
/// Slot key for the pet collection.
pub const STATE_KEY_PETS: &str = "petpulse_pets";
/// Slot key for the appointment collection.
pub const STATE_KEY_APPOINTMENTS: &str = "petpulse_appts";

const REQUIRED_COLUMNS: &[&str] = &["key", "value", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for state persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// A persisted blob failed to serialize or deserialize.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not initialized: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table: {table}"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column: {table}.{column}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted state: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract used by the entity store.
///
/// Loads return `Ok(None)` when the slot has never been written, letting
/// the store decide whether to seed defaults.
pub trait StateRepository {
    fn load_user(&self) -> RepoResult<Option<User>>;
    fn save_user(&self, user: &User) -> RepoResult<()>;
    fn clear_user(&self) -> RepoResult<()>;
    fn load_pets(&self) -> RepoResult<Option<Vec<Pet>>>;
    fn save_pets(&self, pets: &[Pet]) -> RepoResult<()>;
    fn load_appointments(&self) -> RepoResult<Option<Vec<Appointment>>>;
    fn save_appointments(&self, appointments: &[Appointment]) -> RepoResult<()>;
}

/// SQLite-backed state repository over the `app_state` table.
#[derive(Debug)]
pub struct SqliteStateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateRepository<'conn> {
    /// Creates a repository after verifying the connection schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not contain the expected `app_state` shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        require_table(conn, "app_state")?;
        for &column in REQUIRED_COLUMNS {
            require_column(conn, "app_state", column)?;
        }

        Ok(Self { conn })
    }

    fn load_slot<T: DeserializeOwned>(&self, key: &'static str) -> RepoResult<Option<T>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM app_state WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let blob: String = row.get(0)?;
        let value = serde_json::from_str(&blob).map_err(|err| {
            RepoError::InvalidData(format!("bad `{key}` blob: {err}"))
        })?;
        Ok(Some(value))
    }

    fn save_slot<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> RepoResult<()> {
        let blob = serde_json::to_string(value).map_err(|err| {
            RepoError::InvalidData(format!("cannot serialize `{key}` blob: {err}"))
        })?;
        self.conn.execute(
            "INSERT INTO app_state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, blob],
        )?;
        Ok(())
    }

    fn delete_slot(&self, key: &'static str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM app_state WHERE key = ?1;", [key])?;
        Ok(())
    }
}

impl StateRepository for SqliteStateRepository<'_> {
    fn load_user(&self) -> RepoResult<Option<User>> {
        self.load_slot(STATE_KEY_USER)
    }

    fn save_user(&self, user: &User) -> RepoResult<()> {
        self.save_slot(STATE_KEY_USER, user)
    }

    fn clear_user(&self) -> RepoResult<()> {
        self.delete_slot(STATE_KEY_USER)
    }

    fn load_pets(&self) -> RepoResult<Option<Vec<Pet>>> {
        self.load_slot(STATE_KEY_PETS)
    }

    fn save_pets(&self, pets: &[Pet]) -> RepoResult<()> {
        self.save_slot(STATE_KEY_PETS, pets)
    }

    fn load_appointments(&self) -> RepoResult<Option<Vec<Appointment>>> {
        self.load_slot(STATE_KEY_APPOINTMENTS)
    }

    fn save_appointments(&self, appointments: &[Appointment]) -> RepoResult<()> {
        self.save_slot(STATE_KEY_APPOINTMENTS, appointments)
    }
}

fn require_table(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;")?;
    let mut rows = stmt.query([table])?;
    if rows.next()?.is_none() {
        return Err(RepoError::MissingRequiredTable(table));
    }
    Ok(())
}

fn require_column(conn: &Connection, table: &'static str, column: &'static str) -> RepoResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get("name")?;
        if name == column {
            return Ok(());
        }
    }
    Err(RepoError::MissingRequiredColumn { table, column })
}
