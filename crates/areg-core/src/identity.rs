//! # Identifier Newtypes
//!
//! [`RecordId`] is the opaque server identity used in URLs. [`RecordCode`] is
//! the sequential register code shown to people; the server assigns it and it
//! never changes after creation.

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque server-side identifier of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a server-issued identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Sequential register code assigned by the server (for example `"AR-0042"`).
///
/// Accepts numeric codes on the wire and stores them in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordCode(String);

impl RecordCode {
    /// Wrap a server-issued code.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RecordCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::wire::string_or_number(deserializer).map(Self)
    }
}

impl std::fmt::Display for RecordCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_code_accepts_numbers() {
        let code: RecordCode = serde_json::from_str("42").unwrap();
        assert_eq!(code.as_str(), "42");
        let code: RecordCode = serde_json::from_str("\"AR-0042\"").unwrap();
        assert_eq!(code.as_str(), "AR-0042");
    }

    #[test]
    fn record_id_is_transparent() {
        let id = RecordId::new("65f1c0ffee");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"65f1c0ffee\"");
        assert_eq!(id.to_string(), "65f1c0ffee");
    }
}
