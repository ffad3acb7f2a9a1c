//! User record model.
//!
//! # Invariants
//! - `id` is unique within one store instance.
//! - `website` is only ever set on remotely fetched records.

use crate::model::user_form::UserInput;
use serde::{Deserialize, Serialize};

/// Integer identity of a user record.
///
/// Remote ids pass through unchanged; local ids are `max + 1`.
pub type UserId = i64;

/// One user entry as held by [`crate::UserStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub city: String,
    /// Not collected by the local form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl UserRecord {
    /// Builds a locally created record from already validated input.
    pub fn from_input(id: UserId, input: &UserInput) -> Self {
        Self {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            company: input.company.clone(),
            city: input.city.clone(),
            website: None,
        }
    }

    /// Replaces the form-editable fields, keeping `id` and `website`.
    pub fn apply_input(&mut self, input: &UserInput) {
        self.name = input.name.clone();
        self.email = input.email.clone();
        self.phone = input.phone.clone();
        self.company = input.company.clone();
        self.city = input.city.clone();
    }

    /// Projects the form-editable fields back into an input, e.g. to seed an edit form.
    pub fn to_input(&self) -> UserInput {
        UserInput {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            company: self.company.clone(),
            city: self.city.clone(),
        }
    }
}
