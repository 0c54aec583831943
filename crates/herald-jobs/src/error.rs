use thiserror::Error;

/// Errors produced while validating a job declaration.
///
/// One variant per check in the validation sequence, each with a distinct
/// code for the fatal log line. All of these abort the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobError {
    #[error("Invalid job entry: missing message index")]
    MissingMessage,

    #[error("Invalid job entry: missing contacts")]
    MissingContacts,

    #[error("Invalid job entry: missing date")]
    MissingDate,

    #[error("Invalid job entry: contacts are empty")]
    EmptyContacts,

    #[error("Invalid job entry: message index {index} is out of range (catalog has {len} entries)")]
    MessageIndexOutOfRange { index: i64, len: usize },

    #[error("Invalid job entry: date has {len} elements, expected [hour, minute]")]
    DateTooShort { len: usize },

    #[error("Invalid job entry: hour {hour} is outside 0..=23")]
    HourOutOfRange { hour: i64 },

    #[error("Invalid job entry: minute {minute} is outside 0..=59")]
    MinuteOutOfRange { minute: i64 },

    /// The contacts field is neither a list of ids nor a string.
    #[error("Invalid job entry: contacts must be a list of ids or the string \"all\"")]
    ContactsInvalid,

    #[error("Invalid job entry: contact {id:?} is not in the phonebook")]
    UnknownContact { id: String },

    /// A string selector that is not the literal "all".
    #[error("Invalid job entry: unknown contact selector {got:?} (only \"all\" is recognised)")]
    ContactsNotAll { got: String },

    /// The jobs file itself could not be decoded into job entries.
    #[error("Invalid jobs file: {0}")]
    Decode(String),
}

impl JobError {
    /// Short error code string included in the fatal log line.
    pub fn code(&self) -> &'static str {
        match self {
            JobError::MissingMessage => "MISSING_MESSAGE",
            JobError::MissingContacts => "MISSING_CONTACTS",
            JobError::MissingDate => "MISSING_DATE",
            JobError::EmptyContacts => "EMPTY_CONTACTS",
            JobError::MessageIndexOutOfRange { .. } => "MESSAGE_INDEX_OUT_OF_RANGE",
            JobError::DateTooShort { .. } => "DATE_TOO_SHORT",
            JobError::HourOutOfRange { .. } => "HOUR_OUT_OF_RANGE",
            JobError::MinuteOutOfRange { .. } => "MINUTE_OUT_OF_RANGE",
            JobError::ContactsInvalid => "CONTACTS_INVALID",
            JobError::UnknownContact { .. } => "UNKNOWN_CONTACT",
            JobError::ContactsNotAll { .. } => "CONTACTS_NOT_ALL",
            JobError::Decode(_) => "JOBS_DECODE",
        }
    }
}

pub type Result<T> = std::result::Result<T, JobError>;
