//! Core use-case services.
//!
//! # Responsibility
//! - Enforce audit-timestamp and soft-delete policy on top of repositories.
//! - Keep presentation layers decoupled from storage details.

pub mod child_service;
