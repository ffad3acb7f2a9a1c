//! User form input and its validator.
//!
//! # Responsibility
//! - Carry the five required user fields collected by create/edit forms.
//! - Report every failing field with a user-facing message.
//!
//! # Invariants
//! - Validation never mutates its input.
//! - An empty [`FieldErrors`] means the input is valid.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Candidate values for a user record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub city: String,
}

/// Form field addressed by a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    Name,
    Email,
    Phone,
    Company,
    City,
}

impl UserField {
    /// Stable field key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
            Self::City => "city",
        }
    }
}

impl Display for UserField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<UserField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: UserField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: UserField) -> bool {
        self.0.contains_key(&field)
    }

    /// Failing fields in field order.
    pub fn fields(&self) -> impl Iterator<Item = UserField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserField, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: UserField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

impl UserInput {
    /// Shorthand for [`validate_user_input`].
    pub fn validate(&self) -> FieldErrors {
        validate_user_input(self)
    }
}

/// Validates the five required fields.
///
/// Rules:
/// - `name`, `phone`, `company`, `city`: non-empty after trimming.
/// - `email`: non-empty after trimming and shaped like `local@domain.tld`.
pub fn validate_user_input(input: &UserInput) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if input.name.trim().is_empty() {
        errors.insert(UserField::Name, "Name is required");
    }

    if input.email.trim().is_empty() {
        errors.insert(UserField::Email, "Email is required");
    } else if !EMAIL_RE.is_match(&input.email) {
        errors.insert(UserField::Email, "Invalid email");
    }

    if input.phone.trim().is_empty() {
        errors.insert(UserField::Phone, "Phone is required");
    }

    if input.company.trim().is_empty() {
        errors.insert(UserField::Company, "Company is required");
    }

    if input.city.trim().is_empty() {
        errors.insert(UserField::City, "City is required");
    }

    errors
}
