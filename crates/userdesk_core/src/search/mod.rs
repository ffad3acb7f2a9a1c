//! In-memory search over user records.
//!
//! # Invariants
//! - Results keep collection order.
//! - Nothing is cached; every call reads current records.

pub mod filter;
