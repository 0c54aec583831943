use thiserror::Error;

/// Errors produced while building the Recipient Directory.
///
/// All of these are fatal to the run: ingestion is all-or-nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Invalid phonebook entry: missing ID")]
    MissingId,

    #[error("Invalid phonebook entry: missing phone number (ID: {id})")]
    MissingPhone { id: String },

    /// Exact string match against an already-ingested phone number.
    #[error("Duplicate phonebook entry (ID: {id}, Phone: {phone})")]
    DuplicatePhone { id: String, phone: String },

    #[error("Invalid phonebook entry: phone number has {digits} digits, expected 12 (ID: {id})")]
    PhoneFormat { id: String, digits: usize },
}

impl DirectoryError {
    /// Short error code string included in the fatal log line.
    pub fn code(&self) -> &'static str {
        match self {
            DirectoryError::MissingId => "MISSING_ID",
            DirectoryError::MissingPhone { .. } => "MISSING_PHONE",
            DirectoryError::DuplicatePhone { .. } => "DUPLICATE_PHONE",
            DirectoryError::PhoneFormat { .. } => "PHONE_FORMAT",
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
