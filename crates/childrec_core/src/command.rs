//! Message-passing boundary for presentation layers.
//!
//! A caller emits one `ChildCommand` per user intent and receives a
//! `ChildOutcome` (or a typed error) back. Payloads are plain values so
//! callers never share state with the core.

use crate::model::child::{AgeInput, Child, ChildId};
use serde::{Deserialize, Serialize};

/// User intent sent to `ChildStore::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum ChildCommand {
    Add {
        name: String,
        surname: String,
        mail_address: String,
        age: AgeInput,
    },
    /// `changes` holds `(field, value)` pairs as typed by the user.
    Update {
        id: ChildId,
        changes: Vec<(String, String)>,
    },
    Toggle {
        id: ChildId,
    },
    Get {
        id: ChildId,
    },
    List,
}

impl ChildCommand {
    /// Short stable name used in log events.
    pub fn intent(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Update { .. } => "update",
            Self::Toggle { .. } => "toggle",
            Self::Get { .. } => "get",
            Self::List => "list",
        }
    }
}

/// Result value returned for a successfully handled command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum ChildOutcome {
    Record(Child),
    /// Target id does not exist; nothing was written.
    Absent,
    Records(Vec<Child>),
}

impl ChildOutcome {
    pub(crate) fn from_lookup(found: Option<Child>) -> Self {
        match found {
            Some(child) => Self::Record(child),
            None => Self::Absent,
        }
    }
}
