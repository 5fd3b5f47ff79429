//! Product identifiers.
//!
//! Product ids come from two places: the catalog (numbers in older data) and
//! the `data-product-id` attribute of rendered product cards (always strings).
//! [`ProductId`] normalizes both into one comparable string form.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A stable, comparable product identifier.
///
/// Serializes as a JSON string. Deserializes from either a string or an
/// integer so that carts persisted with numeric ids still load.
///
/// ```
/// use lavs_boutique_core::ProductId;
///
/// let from_number: ProductId = serde_json::from_str("7").unwrap();
/// let from_string: ProductId = serde_json::from_str("\"7\"").unwrap();
/// assert_eq!(from_number, from_string);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Signed(n) => Self(n.to_string()),
            Raw::Unsigned(n) => Self(n.to_string()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids_compare_equal() {
        let a: ProductId = serde_json::from_str("12").unwrap();
        let b: ProductId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, ProductId::from(12_u64));
    }

    #[test]
    fn test_serializes_as_string() {
        let id = ProductId::from(3_u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"3\"");
    }

    #[test]
    fn test_rejects_non_scalar() {
        assert!(serde_json::from_str::<ProductId>("[1]").is_err());
        assert!(serde_json::from_str::<ProductId>("null").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ProductId::new("scarf-01").to_string(), "scarf-01");
    }
}
