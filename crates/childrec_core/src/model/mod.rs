//! Child record domain model.
//!
//! # Responsibility
//! - Define the canonical record stored by core and returned to callers.
//! - Keep lifecycle helpers for soft-delete and audit timestamps in one place.
//!
//! # Invariants
//! - Every record is identified by a stable store-assigned `ChildId`.
//! - Deletion is represented by the `is_active` flag, never by removing rows.

pub mod child;
