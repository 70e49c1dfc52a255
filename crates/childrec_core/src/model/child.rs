//! Child domain model.
//!
//! # Responsibility
//! - Define the persisted child record and its typed field changes.
//! - Coerce caller-supplied age input into an integer.
//! - Provide lifecycle helpers for soft-delete and audit timestamps.
//!
//! # Invariants
//! - `deleted_at` is set iff `is_active` is false.
//! - `created_at <= updated_at` and `created_at <= deleted_at` when set.
//! - A new stamp is never earlier than any stamp the record currently
//!   carries. A restore clears `deleted_at`, so it stops bounding later
//!   updates.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier. Stable for the lifetime of the record.
pub type ChildId = i64;

/// Validation errors for caller input and record invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildValidationError {
    /// Age text could not be parsed as a base-10 integer.
    InvalidAge(String),
    /// Field name is not one of the recognized record fields.
    UnknownField(String),
    /// `deleted_at` presence disagrees with `is_active`.
    DeletedAtMismatch { is_active: bool },
    /// A lifecycle timestamp is earlier than `created_at`.
    TimestampBeforeCreation(&'static str),
}

impl Display for ChildValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAge(value) => write!(f, "age must be an integer, got `{value}`"),
            Self::UnknownField(name) => write!(f, "unknown child field `{name}`"),
            Self::DeletedAtMismatch { is_active: true } => {
                write!(f, "active record must not have deleted_at")
            }
            Self::DeletedAtMismatch { is_active: false } => {
                write!(f, "inactive record must have deleted_at")
            }
            Self::TimestampBeforeCreation(field) => {
                write!(f, "{field} must not be earlier than created_at")
            }
        }
    }
}

impl Error for ChildValidationError {}

/// Status derived from `is_active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    Active,
    Inactive,
}

/// Age as supplied by a caller: free text from a form field or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeInput {
    Text(String),
    Number(i64),
}

impl AgeInput {
    /// Coerces the input into an integer age.
    ///
    /// Text is trimmed and parsed as base-10; a leading sign is accepted.
    pub fn coerce(&self) -> Result<i64, ChildValidationError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ChildValidationError::InvalidAge(raw.clone())),
        }
    }
}

impl From<&str> for AgeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AgeInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for AgeInput {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AgeInput {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for AgeInput {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

/// One field mutation applied by `update_record`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildChange {
    Name(String),
    Surname(String),
    MailAddress(String),
    Age(i64),
}

impl ChildChange {
    /// Parses a `(field, value)` pair coming from the presentation layer.
    ///
    /// Recognized fields: `name`, `surname`, `mail_address` (or the legacy
    /// `mailaddress`) and `age`. Field names are matched exactly.
    pub fn parse(field: &str, value: impl Into<String>) -> Result<Self, ChildValidationError> {
        let value = value.into();
        match field {
            "name" => Ok(Self::Name(value)),
            "surname" => Ok(Self::Surname(value)),
            "mail_address" | "mailaddress" => Ok(Self::MailAddress(value)),
            "age" => AgeInput::Text(value).coerce().map(Self::Age),
            other => Err(ChildValidationError::UnknownField(other.to_string())),
        }
    }

    /// Parses every pair, failing on the first unknown field or bad age.
    pub fn parse_all<I, K, V>(pairs: I) -> Result<Vec<Self>, ChildValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(field, value)| Self::parse(field.as_ref(), value))
            .collect()
    }

    /// Stable column name touched by this change.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Surname(_) => "surname",
            Self::MailAddress(_) => "mail_address",
            Self::Age(_) => "age",
        }
    }
}

/// Caller-supplied fields for a record that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChild {
    pub name: String,
    pub surname: String,
    pub mail_address: String,
    pub age: i64,
}

impl NewChild {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        mail_address: impl Into<String>,
        age: i64,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            mail_address: mail_address.into(),
            age,
        }
    }
}

/// Persisted child record with audit and status metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: ChildId,
    pub name: String,
    pub surname: String,
    pub mail_address: String,
    pub age: i64,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Bumped by field updates only.
    pub updated_at: Option<DateTime<Utc>>,
    /// Present exactly while the record is inactive.
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl Child {
    pub fn status(&self) -> ChildStatus {
        if self.is_active {
            ChildStatus::Active
        } else {
            ChildStatus::Inactive
        }
    }

    /// Applies one field change. Does not touch timestamps or status.
    pub fn apply_change(&mut self, change: ChildChange) {
        match change {
            ChildChange::Name(value) => self.name = value,
            ChildChange::Surname(value) => self.surname = value,
            ChildChange::MailAddress(value) => self.mail_address = value,
            ChildChange::Age(value) => self.age = value,
        }
    }

    /// Marks the record as updated at `now`, clamped to keep history monotonic.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(self.next_timestamp(now));
    }

    /// Flips `is_active` and keeps `deleted_at` in step with it.
    ///
    /// `updated_at` is left untouched. Returns the new status.
    pub fn toggle_active(&mut self, now: DateTime<Utc>) -> ChildStatus {
        if self.is_active {
            self.deleted_at = Some(self.next_timestamp(now));
            self.is_active = false;
        } else {
            self.deleted_at = None;
            self.is_active = true;
        }
        self.status()
    }

    /// Latest timestamp currently present on this record.
    pub fn latest_timestamp(&self) -> DateTime<Utc> {
        [self.updated_at, self.deleted_at]
            .into_iter()
            .flatten()
            .fold(self.created_at, |latest, at| latest.max(at))
    }

    /// Checks status and timestamp invariants.
    pub fn validate(&self) -> Result<(), ChildValidationError> {
        if self.is_active == self.deleted_at.is_some() {
            return Err(ChildValidationError::DeletedAtMismatch {
                is_active: self.is_active,
            });
        }
        if self.updated_at.is_some_and(|at| at < self.created_at) {
            return Err(ChildValidationError::TimestampBeforeCreation("updated_at"));
        }
        if self.deleted_at.is_some_and(|at| at < self.created_at) {
            return Err(ChildValidationError::TimestampBeforeCreation("deleted_at"));
        }
        Ok(())
    }

    fn next_timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.max(self.latest_timestamp())
    }
}

/// Current UTC time at the millisecond precision used by storage.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
