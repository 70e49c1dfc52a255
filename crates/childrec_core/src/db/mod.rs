//! Embedded SQLite medium for child records.
//!
//! Opening a database always leaves it at `schema::SCHEMA_VERSION`; callers
//! never see a connection without the `children` table.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Where a connection lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    File,
    Memory,
}

impl OpenMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

/// The storage medium is unavailable or unusable.
#[derive(Debug)]
pub enum DbError {
    /// SQLite refused to open the medium at all.
    Unavailable {
        mode: OpenMode,
        source: rusqlite::Error,
    },
    /// The file carries a schema written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// Any statement failed after the medium was opened.
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { mode, source } => {
                write!(f, "cannot open {} database: {source}", mode.as_str())
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "children schema version {found} is newer than supported {supported}"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable { source, .. } => Some(source),
            Self::SchemaTooNew { .. } => None,
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
