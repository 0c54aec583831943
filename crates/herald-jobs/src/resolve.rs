use herald_directory::{Directory, MessageCatalog};
use serde_json::Value;

use crate::error::{JobError, Result};
use crate::types::{RawJob, ResolvedJob};

/// Validate one raw declaration against the directory and catalog, then
/// materialise it into a [`ResolvedJob`].
///
/// Checks run in a fixed order and short-circuit at the first defect. This
/// is a pure function: the caller decides what a failure does to the
/// process.
pub fn resolve(
    raw: &RawJob,
    directory: &Directory,
    catalog: &MessageCatalog,
) -> Result<ResolvedJob> {
    let index = raw.message.ok_or(JobError::MissingMessage)?;
    let contacts = match &raw.contacts {
        None | Some(Value::Null) => return Err(JobError::MissingContacts),
        Some(v) => v,
    };
    let date = raw.date.as_ref().ok_or(JobError::MissingDate)?;

    let is_empty = match contacts {
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    if is_empty {
        return Err(JobError::EmptyContacts);
    }

    if index < 0 || index as usize >= catalog.len() {
        return Err(JobError::MessageIndexOutOfRange {
            index,
            len: catalog.len(),
        });
    }

    if date.len() < 2 {
        return Err(JobError::DateTooShort { len: date.len() });
    }
    let hour = date[0];
    if !(0..=23).contains(&hour) {
        return Err(JobError::HourOutOfRange { hour });
    }
    let minute = date[1];
    if !(0..=59).contains(&minute) {
        return Err(JobError::MinuteOutOfRange { minute });
    }

    let recipients = match contacts {
        Value::Array(items) => {
            let mut ids = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(id) => ids.push(id.as_str()),
                    _ => return Err(JobError::ContactsInvalid),
                }
            }
            for id in &ids {
                if !directory.contains(id) {
                    return Err(JobError::UnknownContact { id: id.to_string() });
                }
            }
            // Directory order, not declaration order; repeated ids collapse
            // because each directory record is visited once.
            directory
                .records()
                .iter()
                .filter(|r| ids.contains(&r.id.as_str()))
                .cloned()
                .collect()
        }
        Value::String(s) if s == "all" => directory.records().to_vec(),
        Value::String(s) => {
            return Err(JobError::ContactsNotAll { got: s.clone() });
        }
        _ => return Err(JobError::ContactsInvalid),
    };

    let message = catalog
        .get(index as usize)
        .ok_or(JobError::MessageIndexOutOfRange {
            index,
            len: catalog.len(),
        })?
        .to_string();

    Ok(ResolvedJob {
        message,
        recipients,
        hour: hour as u8,
        minute: minute as u8,
    })
}
