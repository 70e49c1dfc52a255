//! Child lifecycle service.
//!
//! # Responsibility
//! - Coerce caller input and create records.
//! - Apply field updates with `updated_at` bookkeeping.
//! - Toggle soft-delete status with `deleted_at` bookkeeping.
//!
//! # Invariants
//! - A missing id is reported as `Ok(None)` and nothing is written.
//! - Field updates never alter `is_active` or `deleted_at`.
//! - Status toggles never alter `updated_at`.
//! - Storage failures are returned unchanged and never retried.

use crate::model::child::{
    utc_now, AgeInput, Child, ChildChange, ChildId, ChildValidationError, NewChild,
};
use crate::repo::child_repo::{ChildRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for child lifecycle use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller input was rejected (unknown field, non-integer age) or a record
    /// would violate model invariants.
    Validation(ChildValidationError),
    /// Record vanished between lookup and save.
    NotFound(ChildId),
    /// Storage medium failure.
    Storage(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "child not found: {id}"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ChildValidationError> for ServiceError {
    fn from(value: ChildValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Storage(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Lifecycle facade over a child repository.
pub struct ChildService<R: ChildRepository> {
    repo: R,
}

impl<R: ChildRepository> ChildService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one active record after coercing `age`.
    ///
    /// Nothing is written when `age` is not an integer.
    pub fn add_record(
        &self,
        name: impl Into<String>,
        surname: impl Into<String>,
        mail_address: impl Into<String>,
        age: impl Into<AgeInput>,
    ) -> ServiceResult<Child> {
        let age = age.into().coerce().inspect_err(|err| {
            warn!("event=child_add module=service status=rejected reason={err}");
        })?;
        let created = self
            .repo
            .create(&NewChild::new(name, surname, mail_address, age))?;
        info!(
            "event=child_add module=service status=ok child_id={}",
            created.id
        );
        Ok(created)
    }

    /// Applies field changes and bumps `updated_at`.
    ///
    /// Returns `Ok(None)` without writing when `id` does not exist.
    pub fn update_record(
        &self,
        id: ChildId,
        changes: Vec<ChildChange>,
    ) -> ServiceResult<Option<Child>> {
        match self.find_for_update(id)? {
            Some(child) => self.save_changes(child, changes).map(Some),
            None => Ok(None),
        }
    }

    /// Looks `id` up, then parses `(field, value)` pairs and applies them.
    ///
    /// A missing id yields `Ok(None)` whatever the pairs contain; unknown
    /// fields and bad ages are rejected only for existing records.
    pub fn update_fields<I, K, V>(&self, id: ChildId, pairs: I) -> ServiceResult<Option<Child>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let Some(child) = self.find_for_update(id)? else {
            return Ok(None);
        };
        let changes = ChildChange::parse_all(pairs).inspect_err(|err| {
            warn!("event=child_update module=service status=rejected child_id={id} reason={err}");
        })?;
        self.save_changes(child, changes).map(Some)
    }

    fn find_for_update(&self, id: ChildId) -> ServiceResult<Option<Child>> {
        let found = self.repo.get(id)?;
        if found.is_none() {
            info!("event=child_update module=service status=absent child_id={id}");
        }
        Ok(found)
    }

    fn save_changes(&self, mut child: Child, changes: Vec<ChildChange>) -> ServiceResult<Child> {
        let fields = changes
            .iter()
            .map(ChildChange::field_name)
            .collect::<Vec<_>>()
            .join(",");
        for change in changes {
            child.apply_change(change);
        }
        child.touch(utc_now());

        let saved = self.repo.save(&child)?;
        info!(
            "event=child_update module=service status=ok child_id={} fields={fields}",
            saved.id
        );
        Ok(saved)
    }

    /// Flips the soft-delete status of one record.
    ///
    /// Returns `Ok(None)` without writing when `id` does not exist.
    pub fn toggle_active(&self, id: ChildId) -> ServiceResult<Option<Child>> {
        let Some(mut child) = self.repo.get(id)? else {
            info!("event=child_toggle module=service status=absent child_id={id}");
            return Ok(None);
        };

        let status = child.toggle_active(utc_now());
        let saved = self.repo.save(&child)?;
        info!("event=child_toggle module=service status=ok child_id={id} new_status={status:?}");
        Ok(Some(saved))
    }

    /// Gets one record by id, active or not.
    pub fn get_record(&self, id: ChildId) -> ServiceResult<Option<Child>> {
        Ok(self.repo.get(id)?)
    }

    /// Lists active and inactive records in id order.
    pub fn list_records(&self) -> ServiceResult<Vec<Child>> {
        Ok(self.repo.list_all()?)
    }

    /// Counts all stored records.
    pub fn count_records(&self) -> ServiceResult<u64> {
        Ok(self.repo.count()?)
    }
}
