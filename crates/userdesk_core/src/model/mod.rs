//! Domain records held by the stores.
//!
//! # Responsibility
//! - Define the user and task records and the user form input.
//! - Keep field validation pure and independent of any store.
//!
//! # Invariants
//! - Records are plain data; stores own identity assignment.

pub mod task;
pub mod user;
pub mod user_form;
