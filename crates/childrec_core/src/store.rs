//! Owned store handle with scoped, per-operation transactions.
//!
//! # Responsibility
//! - Own the SQLite connection; no process-wide connection state exists.
//! - Run every lifecycle operation inside exactly one transaction.
//!
//! # Invariants
//! - A transaction commits only when the operation returns `Ok`.
//! - Every error path, including validation failures, rolls back.

use crate::command::{ChildCommand, ChildOutcome};
use crate::db::{open_db, open_db_in_memory};
use crate::model::child::{AgeInput, Child, ChildChange, ChildId};
use crate::repo::child_repo::{RepoError, RepoResult, SqliteChildRepository};
use crate::service::child_service::{ChildService, ServiceResult};
use log::{debug, warn};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;

/// Service type handed to operations run inside a store transaction.
pub type ScopedChildService<'tx> = ChildService<SqliteChildRepository<'tx>>;

/// Explicitly constructed handle over one child database.
pub struct ChildStore {
    conn: Connection,
}

impl ChildStore {
    /// Opens (or creates) a database file and verifies its schema.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> RepoResult<Self> {
        SqliteChildRepository::try_new(&conn)?;
        Ok(Self { conn })
    }

    /// Runs `op` inside one IMMEDIATE transaction.
    ///
    /// Commits when `op` returns `Ok`; the transaction is dropped and rolled
    /// back otherwise.
    pub fn run<T>(
        &mut self,
        op: impl FnOnce(&ScopedChildService<'_>) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        self.transact("run", op)
    }

    pub fn add_record(
        &mut self,
        name: impl Into<String>,
        surname: impl Into<String>,
        mail_address: impl Into<String>,
        age: impl Into<AgeInput>,
    ) -> ServiceResult<Child> {
        self.transact("add", |service| {
            service.add_record(name, surname, mail_address, age)
        })
    }

    pub fn update_record(
        &mut self,
        id: ChildId,
        changes: Vec<ChildChange>,
    ) -> ServiceResult<Option<Child>> {
        self.transact("update", |service| service.update_record(id, changes))
    }

    pub fn toggle_active(&mut self, id: ChildId) -> ServiceResult<Option<Child>> {
        self.transact("toggle", |service| service.toggle_active(id))
    }

    pub fn get_record(&mut self, id: ChildId) -> ServiceResult<Option<Child>> {
        self.transact("get", |service| service.get_record(id))
    }

    pub fn list_records(&mut self) -> ServiceResult<Vec<Child>> {
        self.transact("list", |service| service.list_records())
    }

    pub fn count_records(&mut self) -> ServiceResult<u64> {
        self.transact("count", |service| service.count_records())
    }

    /// Handles one presentation-layer intent.
    pub fn dispatch(&mut self, command: ChildCommand) -> ServiceResult<ChildOutcome> {
        let intent = command.intent();
        self.transact(intent, |service| match command {
            ChildCommand::Add {
                name,
                surname,
                mail_address,
                age,
            } => service
                .add_record(name, surname, mail_address, age)
                .map(ChildOutcome::Record),
            ChildCommand::Update { id, changes } => service
                .update_fields(id, changes)
                .map(ChildOutcome::from_lookup),
            ChildCommand::Toggle { id } => {
                service.toggle_active(id).map(ChildOutcome::from_lookup)
            }
            ChildCommand::Get { id } => service.get_record(id).map(ChildOutcome::from_lookup),
            ChildCommand::List => service.list_records().map(ChildOutcome::Records),
        })
    }

    fn transact<T>(
        &mut self,
        op_name: &'static str,
        op: impl FnOnce(&ScopedChildService<'_>) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;

        let result = {
            let repo = SqliteChildRepository::try_new(&tx)?;
            op(&ChildService::new(repo))
        };

        match result {
            Ok(value) => {
                tx.commit().map_err(RepoError::from)?;
                debug!("event=store_tx module=store status=commit op={op_name}");
                Ok(value)
            }
            Err(err) => {
                warn!("event=store_tx module=store status=rollback op={op_name} error={err}");
                Err(err)
            }
        }
    }
}
