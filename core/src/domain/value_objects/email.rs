//! Email value object

use serde::{Deserialize, Serialize};
use std::fmt;

use dk_shared::validation::{is_valid_email, normalize_email};

use crate::errors::DomainError;

/// A normalised (trimmed, lowercase) and syntactically valid email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Normalise and validate an address
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let email = normalize_email(raw);
        if !is_valid_email(&email) {
            return Err(DomainError::validation("Invalid email address"));
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
