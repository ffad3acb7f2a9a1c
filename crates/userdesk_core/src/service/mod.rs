//! Stateful stores behind the application views.
//!
//! # Responsibility
//! - Own the in-memory collections and their mutation rules.
//! - Talk to collaborators only through injected traits.
//!
//! # Invariants
//! - No store operation panics or leaves a store unusable.
//! - Validation and not-found outcomes are returned as values.

pub mod task_store;
pub mod user_store;
