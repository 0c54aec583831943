use tracing::debug;

use crate::error::{DirectoryError, Result};
use crate::types::{digit_count, ContactOrigin, ContactRecord};

/// Number of digit characters a phone number must strip down to.
const PHONE_DIGITS: usize = 12;

/// Validated mapping of contact id → phone number.
///
/// Insertion order is preserved so that `"all"` selector resolution and
/// directory-order recipient lists are deterministic.
#[derive(Debug, Default)]
pub struct Directory {
    records: Vec<ContactRecord>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append one contact.
    ///
    /// Checks run in a fixed order so diagnostics are deterministic:
    /// missing id, missing phone, duplicate phone (exact string match),
    /// then digit count.
    pub fn ingest(&mut self, id: &str, phone: &str, origin: ContactOrigin) -> Result<()> {
        let id = id.trim();
        let phone = phone.trim();

        if id.is_empty() {
            return Err(DirectoryError::MissingId);
        }
        if phone.is_empty() {
            return Err(DirectoryError::MissingPhone { id: id.to_string() });
        }
        if self.records.iter().any(|r| r.phone == phone) {
            return Err(DirectoryError::DuplicatePhone {
                id: id.to_string(),
                phone: phone.to_string(),
            });
        }
        let digits = digit_count(phone);
        if digits != PHONE_DIGITS {
            return Err(DirectoryError::PhoneFormat {
                id: id.to_string(),
                digits,
            });
        }

        debug!(id = %id, phone = %phone, ?origin, "contact ingested");
        self.records.push(ContactRecord {
            id: id.to_string(),
            phone: phone.to_string(),
            origin,
        });
        Ok(())
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    /// Look up a contact by id.
    pub fn get(&self, id: &str) -> Option<&ContactRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_with(entries: &[(&str, &str)]) -> Directory {
        let mut dir = Directory::new();
        for (id, phone) in entries {
            dir.ingest(id, phone, ContactOrigin::Local).unwrap();
        }
        dir
    }

    #[test]
    fn ingest_preserves_insertion_order() {
        let dir = directory_with(&[
            ("Alice", "628111111111"),
            ("Bob", "628222222222"),
            ("Carol", "628333333333"),
        ]);
        let ids: Vec<&str> = dir.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn missing_id_is_rejected() {
        let mut dir = Directory::new();
        let err = dir.ingest("  ", "628111111111", ContactOrigin::Local).unwrap_err();
        assert_eq!(err, DirectoryError::MissingId);
        assert_eq!(err.code(), "MISSING_ID");
        assert!(dir.is_empty());
    }

    #[test]
    fn missing_phone_is_rejected() {
        let mut dir = Directory::new();
        let err = dir.ingest("Alice", "", ContactOrigin::Local).unwrap_err();
        assert!(matches!(err, DirectoryError::MissingPhone { .. }));
    }

    #[test]
    fn duplicate_phone_halts_ingestion() {
        let mut dir = directory_with(&[("Alice", "628111111111")]);
        let err = dir
            .ingest("Bob", "628111111111", ContactOrigin::Local)
            .unwrap_err();
        assert_eq!(
            err,
            DirectoryError::DuplicatePhone {
                id: "Bob".to_string(),
                phone: "628111111111".to_string(),
            }
        );
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn duplicate_check_runs_before_format_check() {
        // An already-ingested phone wins over the digit count diagnostic.
        let mut dir = Directory::new();
        // Valid 12-digit entry with separators.
        dir.ingest("Alice", "+62-811-111-1111", ContactOrigin::Local)
            .unwrap();
        let err = dir
            .ingest("Bob", "+62-811-111-1111", ContactOrigin::Local)
            .unwrap_err();
        assert!(matches!(err, DirectoryError::DuplicatePhone { .. }));
    }

    #[test]
    fn eleven_and_thirteen_digits_are_rejected() {
        let mut dir = Directory::new();
        let err = dir.ingest("A", "62811111111", ContactOrigin::Local).unwrap_err();
        assert_eq!(err, DirectoryError::PhoneFormat { id: "A".into(), digits: 11 });

        let err = dir
            .ingest("B", "6281111111111", ContactOrigin::Local)
            .unwrap_err();
        assert_eq!(err, DirectoryError::PhoneFormat { id: "B".into(), digits: 13 });
        assert!(dir.is_empty());
    }

    #[test]
    fn separators_are_ignored_when_counting_digits() {
        let mut dir = Directory::new();
        dir.ingest("Alice", "+62 (811) 111-1111", ContactOrigin::Local)
            .unwrap();
        // Stored as ingested, not normalised.
        assert_eq!(dir.records()[0].phone, "+62 (811) 111-1111");
    }

    #[test]
    fn lookup_by_id() {
        let dir = directory_with(&[("Alice", "628111111111")]);
        assert_eq!(dir.get("Alice").unwrap().phone, "628111111111");
        assert!(dir.get("Nobody").is_none());
        assert!(dir.contains("Alice"));
    }
}
