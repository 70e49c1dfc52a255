//! Child repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide `create/get/save/list_all` over the `children` table.
//! - Keep SQL and column encoding inside the persistence boundary.
//!
//! # Invariants
//! - `id` and `created_at` are written once by `create` and never by `save`.
//! - Timestamps are stored as INTEGER epoch milliseconds.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::schema::{stored_version, SCHEMA_VERSION};
use crate::db::DbError;
use crate::model::child::{utc_now, Child, ChildId, ChildValidationError, NewChild};
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CHILD_SELECT_SQL: &str = "SELECT
    id,
    name,
    surname,
    mail_address,
    age,
    created_at,
    updated_at,
    deleted_at,
    is_active
FROM children";

const CHILD_COLUMNS: [&str; 9] = [
    "id",
    "name",
    "surname",
    "mail_address",
    "age",
    "created_at",
    "updated_at",
    "deleted_at",
    "is_active",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for child persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Record to be written violates model invariants.
    Validation(ChildValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target record does not exist.
    NotFound(ChildId),
    /// Connection schema is not at the expected version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "child not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "child repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "child repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "child repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted child data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ChildValidationError> for RepoError {
    fn from(value: ChildValidationError) -> Self {
        Self::Validation(value)
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

/// Storage primitives for child records.
pub trait ChildRepository {
    /// Inserts a new active record and returns it with generated fields.
    fn create(&self, new_child: &NewChild) -> RepoResult<Child>;
    /// Gets one record by id, active or not.
    fn get(&self, id: ChildId) -> RepoResult<Option<Child>>;
    /// Overwrites all mutable fields of an existing record.
    fn save(&self, child: &Child) -> RepoResult<Child>;
    /// Lists every record in id order.
    fn list_all(&self) -> RepoResult<Vec<Child>>;
    /// Counts every stored record.
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed child repository.
pub struct SqliteChildRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChildRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema was never bootstrapped.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema was
    ///   tampered with.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_child_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ChildRepository for SqliteChildRepository<'_> {
    fn create(&self, new_child: &NewChild) -> RepoResult<Child> {
        let created_at = utc_now();
        self.conn.execute(
            "INSERT INTO children (
                name,
                surname,
                mail_address,
                age,
                created_at,
                updated_at,
                deleted_at,
                is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, NULL, NULL, 1);",
            params![
                new_child.name.as_str(),
                new_child.surname.as_str(),
                new_child.mail_address.as_str(),
                new_child.age,
                created_at.timestamp_millis(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=child_create module=repo status=ok child_id={id}");
        self.get(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created child {id} not found in read-back"))
        })
    }

    fn get(&self, id: ChildId) -> RepoResult<Option<Child>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHILD_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_child_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, child: &Child) -> RepoResult<Child> {
        child.validate()?;

        let changed = self.conn.execute(
            "UPDATE children
             SET
                name = ?1,
                surname = ?2,
                mail_address = ?3,
                age = ?4,
                updated_at = ?5,
                deleted_at = ?6,
                is_active = ?7
             WHERE id = ?8;",
            params![
                child.name.as_str(),
                child.surname.as_str(),
                child.mail_address.as_str(),
                child.age,
                child.updated_at.map(|at| at.timestamp_millis()),
                child.deleted_at.map(|at| at.timestamp_millis()),
                bool_to_int(child.is_active),
                child.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(child.id));
        }

        debug!(
            "event=child_save module=repo status=ok child_id={} is_active={}",
            child.id, child.is_active
        );
        self.get(child.id)?.ok_or(RepoError::NotFound(child.id))
    }

    fn list_all(&self) -> RepoResult<Vec<Child>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHILD_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut children = Vec::new();

        while let Some(row) = rows.next()? {
            children.push(parse_child_row(row)?);
        }

        Ok(children)
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM children;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

fn parse_child_row(row: &Row<'_>) -> RepoResult<Child> {
    let id: ChildId = row.get("id")?;

    let is_active = match row.get::<_, i64>("is_active")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_active value `{other}` for child {id}"
            )));
        }
    };

    let child = Child {
        id,
        name: row.get("name")?,
        surname: row.get("surname")?,
        mail_address: row.get("mail_address")?,
        age: row.get("age")?,
        created_at: parse_timestamp(row.get("created_at")?, "created_at")?,
        updated_at: row
            .get::<_, Option<i64>>("updated_at")?
            .map(|value| parse_timestamp(value, "updated_at"))
            .transpose()?,
        deleted_at: row
            .get::<_, Option<i64>>("deleted_at")?
            .map(|value| parse_timestamp(value, "deleted_at"))
            .transpose()?,
        is_active,
    };

    child
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("child {id}: {err}")))?;
    Ok(child)
}

fn parse_timestamp(millis: i64, column: &'static str) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid timestamp `{millis}` in children.{column}"))
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_child_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = stored_version(conn)?;
    if actual_version != SCHEMA_VERSION {
        return Err(RepoError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }

    if !table_exists(conn, "children")? {
        return Err(RepoError::MissingRequiredTable("children"));
    }

    for column in CHILD_COLUMNS {
        if !table_has_column(conn, "children", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "children",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
