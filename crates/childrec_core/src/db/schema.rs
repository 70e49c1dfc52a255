//! `children` table bootstrap.
//!
//! The schema version lives in `PRAGMA user_version`: `0` is a fresh file,
//! `SCHEMA_VERSION` is ready, anything higher is refused.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const CHILDREN_DDL: &str = include_str!("children.sql");

/// Reads `PRAGMA user_version`.
pub fn stored_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Creates the `children` table on a fresh database.
///
/// Table creation and the version bump commit together or not at all.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    match stored_version(conn)? {
        SCHEMA_VERSION => Ok(()),
        found if found > SCHEMA_VERSION => Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        }),
        found => {
            let tx = conn.transaction()?;
            tx.execute_batch(CHILDREN_DDL)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            info!(
                "event=db_schema module=db status=ok from_version={found} to_version={SCHEMA_VERSION}"
            );
            Ok(())
        }
    }
}
