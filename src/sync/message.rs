//! Commit message construction

use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use thiserror::Error;

use crate::core::config::{MAX_SUBJECT_LENGTH, MIN_MESSAGE_LENGTH};
use crate::core::is_valid_timestamp_format;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("unknown commit type '{given}' (valid types: {})", .valid.join(", "))]
    UnknownCommitType { given: String, valid: Vec<String> },

    #[error("invalid timestamp format '{0}'")]
    InvalidTimestampFormat(String),
}

/// Inputs for one commit message
#[derive(Clone, Debug)]
pub struct MessageRequest<'a> {
    pub explicit: Option<&'a str>,
    pub conventional_type: Option<&'a str>,
    pub types: &'a BTreeMap<String, String>,
    pub conventional_enabled: bool,
    pub prefix: &'a str,
    pub timestamp_format: &'a str,
    pub now: NaiveDateTime,
}

/// Checks a conventional type against the configured set
///
/// Disabled conventional commits accept no type at all.
pub fn check_commit_type(
    given: &str,
    types: &BTreeMap<String, String>,
    enabled: bool,
) -> Result<(), MessageError> {
    if enabled && types.contains_key(given) {
        return Ok(());
    }
    Err(MessageError::UnknownCommitType {
        given: given.to_string(),
        valid: if enabled {
            types.keys().cloned().collect()
        } else {
            Vec::new()
        },
    })
}

/// Builds the commit message
///
/// A type prefixes either the explicit message or a timestamp; without a
/// type the explicit message is used as-is, falling back to the configured
/// prefix and a timestamp.
pub fn build_commit_message(request: &MessageRequest<'_>) -> Result<String, MessageError> {
    if let Some(kind) = request.conventional_type {
        check_commit_type(kind, request.types, request.conventional_enabled)?;
        return match request.explicit {
            Some(message) => Ok(format!("{kind}: {message}")),
            None => Ok(format!("{kind}: {}", timestamp(request)?)),
        };
    }

    match request.explicit {
        Some(message) => Ok(message.to_string()),
        None => Ok(format!("{}: {}", request.prefix, timestamp(request)?)),
    }
}

fn timestamp(request: &MessageRequest<'_>) -> Result<String, MessageError> {
    let invalid = || MessageError::InvalidTimestampFormat(request.timestamp_format.to_string());
    if !is_valid_timestamp_format(request.timestamp_format) {
        return Err(invalid());
    }

    // Formatting can still fail, e.g. %z on a naive time
    let mut formatted = String::new();
    write!(formatted, "{}", request.now.format(request.timestamp_format)).map_err(|_| invalid())?;
    Ok(formatted)
}

/// Non-blocking problems with a commit message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageWarning {
    Blank,
    TooShort,
    SubjectTooLong,
}

impl MessageWarning {
    pub fn text(&self) -> String {
        match self {
            MessageWarning::Blank => "Commit message is empty".to_string(),
            MessageWarning::TooShort => format!(
                "Commit message is shorter than {MIN_MESSAGE_LENGTH} characters"
            ),
            MessageWarning::SubjectTooLong => format!(
                "First line of the commit message exceeds {MAX_SUBJECT_LENGTH} characters"
            ),
        }
    }
}

pub fn advisory_warnings(message: &str) -> Vec<MessageWarning> {
    let mut warnings = Vec::new();
    let trimmed = message.trim();

    if trimmed.is_empty() {
        warnings.push(MessageWarning::Blank);
        return warnings;
    }
    if trimmed.chars().count() < MIN_MESSAGE_LENGTH {
        warnings.push(MessageWarning::TooShort);
    }
    let subject = message.lines().next().unwrap_or_default();
    if subject.chars().count() > MAX_SUBJECT_LENGTH {
        warnings.push(MessageWarning::SubjectTooLong);
    }

    warnings
}
