//! User records and the draft under edit.
//!
//! The remote API uses Portuguese field names on the wire (`nome`, `telefone`,
//! `endereco`); the Rust side uses English names and maps them with serde.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier of a persisted user.
pub type UserId = u64;

/// A user as persisted by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(rename = "endereco", default)]
    pub address: String,
}

/// A record under construction or edit.
///
/// `id` is `None` until the server has persisted the record; a draft carrying
/// an id is an edit of that record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(rename = "endereco", default)]
    pub address: String,
}

impl Draft {
    /// Whether this draft edits an existing record.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Current value of a single field.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
        }
    }

    /// Overwrite a single field, leaving the rest untouched.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Address => self.address = value,
        }
    }
}

impl From<UserRecord> for Draft {
    fn from(record: UserRecord) -> Self {
        Self {
            id: Some(record.id),
            name: record.name,
            email: record.email,
            phone: record.phone,
            address: record.address,
        }
    }
}

/// The editable fields of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Address,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Address];

    /// Name used for this field in forms and on the wire.
    #[must_use]
    pub fn form_name(&self) -> &'static str {
        match self {
            Self::Name => "nome",
            Self::Email => "email",
            Self::Phone => "telefone",
            Self::Address => "endereco",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Address",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_name())
    }
}

/// Returned when a form name does not denote a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nome" | "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "telefone" | "phone" => Ok(Self::Phone),
            "endereco" | "address" => Ok(Self::Address),
            other => Err(UnknownField(other.to_string())),
        }
    }
}
