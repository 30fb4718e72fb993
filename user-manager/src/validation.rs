//! Client-side draft validation.
//!
//! Only `name` and `email` are checked; phone and address are optional.
//! Validation is pure and reports every failing field at once.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::model::{Draft, Field};

pub const NAME_REQUIRED: &str = "Name is required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Invalid email.";

// Unanchored: any `text@text.text` run inside the value passes.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email regex is valid"));

/// Field-level error messages keyed by field.
///
/// Only failing fields are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error, replacing any previous one for the same field.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the error for one field, if any.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Check a draft before it is sent to the server.
#[must_use]
pub fn validate(draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.name.is_empty() {
        errors.insert(Field::Name, NAME_REQUIRED);
    }

    if draft.email.is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !EMAIL_SHAPE.is_match(&draft.email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    errors
}
