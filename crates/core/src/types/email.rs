//! Email addresses submitted through the contact and newsletter forms.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input is empty after trimming.
    #[error("email cannot be empty")]
    Empty,
    /// The input is longer than RFC 5321 allows.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not have the `local@domain.tld` shape.
    #[error("email must look like name@domain.tld")]
    Malformed,
}

/// A trimmed, lower-cased email address.
///
/// ```
/// use lavs_boutique_core::Email;
///
/// let email = Email::parse("  Ava@Example.com ").unwrap();
/// assert_eq!(email.as_str(), "ava@example.com");
/// assert!(Email::parse("ava@example").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse and normalize an email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, too long, or lacks a
    /// non-empty local part and a dotted domain.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let normalized = s.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(EmailError::Empty);
        }
        if normalized.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = normalized.split_once('@').ok_or(EmailError::Malformed)?;
        let domain_ok = !domain.is_empty()
            && !domain.contains('@')
            && domain
                .split('.')
                .filter(|label| !label.is_empty())
                .count()
                >= 2;
        if local.is_empty() || !domain_ok {
            return Err(EmailError::Malformed);
        }

        Ok(Self(normalized))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
