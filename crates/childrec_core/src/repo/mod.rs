//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage primitives the lifecycle layer composes.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Child::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Nothing in this layer deletes rows.

pub mod child_repo;
