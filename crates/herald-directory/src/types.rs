use serde::{Deserialize, Serialize};

/// Where a contact record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactOrigin {
    /// Ingested from the phonebook file at startup.
    Local,
    /// Reported by the transport's contact sync.
    Remote,
}

/// A validated contact — immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Unique, non-empty identifier (the phonebook `ID` column).
    pub id: String,
    /// Phone number as ingested; strips to exactly 12 digits.
    pub phone: String,
    pub origin: ContactOrigin,
}

impl ContactRecord {
    pub fn local(id: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phone: phone.into(),
            origin: ContactOrigin::Local,
        }
    }

    pub fn remote(id: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phone: phone.into(),
            origin: ContactOrigin::Remote,
        }
    }
}

/// Number of ASCII digit characters in `phone`, ignoring separators.
pub fn digit_count(phone: &str) -> usize {
    phone.chars().filter(|c| c.is_ascii_digit()).count()
}
