//! Persistence contracts for durable client state.
//!
//! # Responsibility
//! - Define the key-value blob store consumed by [`crate::TaskStore`].
//! - Provide SQLite and in-memory implementations.
//!
//! # Invariants
//! - Values are opaque text; encoding belongs to the caller.
//! - `put` replaces the whole value for a key.

pub mod blob_repo;
pub mod memory;
