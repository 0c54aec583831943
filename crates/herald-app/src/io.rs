//! Input file loaders — CSV phonebook, CSV messages, JSON jobs.
//!
//! Format handling lives here; the schemas and validation rules belong to
//! the directory and jobs crates. Every failure is fatal: a run never
//! starts with a partially loaded input.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use herald_core::HeraldError;
use herald_directory::{ContactOrigin, Directory, MessageCatalog};
use herald_jobs::{decode_jobs, RawJob};

/// One phonebook row. Fields default to empty so a missing column surfaces
/// as a validation error (with its own code) instead of a CSV parse error.
#[derive(Debug, Deserialize)]
struct PhonebookRow {
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(rename = "Phone", default)]
    phone: String,
}

#[derive(Debug, Deserialize)]
struct MessageRow {
    #[serde(rename = "Message", default)]
    message: String,
}

fn require_file(path: &str) -> Result<(), HeraldError> {
    if !Path::new(path).exists() {
        return Err(HeraldError::ConfigMissing {
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Read and validate the phonebook into a [`Directory`].
pub fn load_phonebook(path: &str) -> Result<Directory, HeraldError> {
    require_file(path)?;
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| HeraldError::Config(format!("failed to open {path}: {e}")))?;

    let mut directory = Directory::new();
    for row in reader.deserialize::<PhonebookRow>() {
        let row = row.map_err(|e| HeraldError::Config(format!("failed to parse {path}: {e}")))?;
        directory
            .ingest(&row.id, &row.phone, ContactOrigin::Local)
            .map_err(|e| HeraldError::Validation {
                code: e.code(),
                reason: e.to_string(),
            })?;
    }

    if directory.is_empty() {
        return Err(HeraldError::Validation {
            code: "EMPTY_PHONEBOOK",
            reason: "phonebook is empty".to_string(),
        });
    }
    info!(entries = directory.len(), path, "phonebook file read");
    Ok(directory)
}

/// Read the message templates into a [`MessageCatalog`], in file order.
pub fn load_catalog(path: &str) -> Result<MessageCatalog, HeraldError> {
    require_file(path)?;
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| HeraldError::Config(format!("failed to open {path}: {e}")))?;

    let mut catalog = MessageCatalog::new();
    for row in reader.deserialize::<MessageRow>() {
        let row = row.map_err(|e| HeraldError::Config(format!("failed to parse {path}: {e}")))?;
        catalog.ingest(row.message);
    }

    if catalog.is_empty() {
        return Err(HeraldError::Validation {
            code: "EMPTY_MESSAGES",
            reason: "messages are empty".to_string(),
        });
    }
    info!(entries = catalog.len(), path, "messages file read");
    Ok(catalog)
}

/// Read the raw job declarations (JSON object or array).
pub fn load_jobs(path: &str) -> Result<Vec<RawJob>, HeraldError> {
    require_file(path)?;
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| HeraldError::Config(format!("failed to parse {path}: {e}")))?;

    let jobs = decode_jobs(value).map_err(|e| HeraldError::Validation {
        code: e.code(),
        reason: e.to_string(),
    })?;

    if jobs.is_empty() {
        return Err(HeraldError::Validation {
            code: "EMPTY_JOBS",
            reason: "jobs are empty".to_string(),
        });
    }
    info!(entries = jobs.len(), path, "jobs file read");
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    struct Scratch(PathBuf);

    impl Scratch {
        fn new(tag: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("herald-io-{tag}-{}", std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, name: &str, content: &str) -> String {
            let path = self.0.join(name);
            fs::write(&path, content).unwrap();
            path.to_string_lossy().into_owned()
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            fs::remove_dir_all(&self.0).ok();
        }
    }

    #[test]
    fn missing_file_is_config_missing() {
        let err = load_phonebook("/nonexistent/phonebook.csv").unwrap_err();
        assert!(matches!(err, HeraldError::ConfigMissing { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn phonebook_round_trip() {
        let scratch = Scratch::new("phonebook");
        let path = scratch.write(
            "phonebook.csv",
            "ID,Phone\nBob,628123456789\nAlice,628111111111\n",
        );
        let directory = load_phonebook(&path).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.records()[0].id, "Bob");
    }

    #[test]
    fn invalid_phonebook_row_is_fatal() {
        let scratch = Scratch::new("badrow");
        let path = scratch.write("phonebook.csv", "ID,Phone\nBob,12345\n");
        let err = load_phonebook(&path).unwrap_err();
        assert!(matches!(
            err,
            HeraldError::Validation {
                code: "PHONE_FORMAT",
                ..
            }
        ));
    }

    #[test]
    fn empty_phonebook_is_fatal() {
        let scratch = Scratch::new("emptypb");
        let path = scratch.write("phonebook.csv", "ID,Phone\n");
        let err = load_phonebook(&path).unwrap_err();
        assert!(matches!(
            err,
            HeraldError::Validation {
                code: "EMPTY_PHONEBOOK",
                ..
            }
        ));
    }

    #[test]
    fn catalog_preserves_file_order() {
        let scratch = Scratch::new("catalog");
        let path = scratch.write("messages.csv", "Message\nHello\nGood night\n");
        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.get(0), Some("Hello"));
        assert_eq!(catalog.get(1), Some("Good night"));
    }

    #[test]
    fn jobs_object_form_loads() {
        let scratch = Scratch::new("jobs");
        let path = scratch.write(
            "jobs.json",
            r#"{ "morning": { "message": 0, "contacts": "all", "date": [10, 30] } }"#,
        );
        let jobs = load_jobs(&path).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].message, Some(0));
    }

    #[test]
    fn empty_jobs_is_fatal() {
        let scratch = Scratch::new("emptyjobs");
        let path = scratch.write("jobs.json", "{}");
        let err = load_jobs(&path).unwrap_err();
        assert!(matches!(
            err,
            HeraldError::Validation {
                code: "EMPTY_JOBS",
                ..
            }
        ));
    }
}
