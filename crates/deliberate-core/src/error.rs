//! Error types for the practice core.
//!
//! Every failure is fatal to the operation that raised it. Callers decide how
//! to present them; the CLI prints the full chain and exits.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The activities source could not be turned into a registry.
#[derive(Debug, Error)]
pub enum ActivitiesFileError {
    /// The file is missing or unreadable.
    #[error("no activity file found at {}, please create an activity file", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every line of the file was blank.
    #[error("no activities found in {}, please add activities", .path.display())]
    Empty { path: PathBuf },
}

/// The practices file exists but does not hold a valid store.
#[derive(Debug, Error)]
pub enum PracticesFileError {
    /// Reading or writing the backing file failed.
    #[error("practices file I/O failed for {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The first line was not a record count.
    #[error("expected an integer for number of practice sets, instead got \"{found}\"")]
    InvalidCount { found: String },

    /// One of the counted records was malformed.
    #[error("failed to load practice set #{index}")]
    Record {
        index: usize,
        #[source]
        source: RecordLoadError,
    },

    /// A record key would not survive a save and reload.
    #[error("practice set #{index} has activity key {key:?}, which must be a single non-blank line")]
    UnstorableKey { index: usize, key: String },

    /// Content remained after the last counted record.
    #[error("unexpected data remaining after load completed, found:\n{remaining}")]
    TrailingData { remaining: String },
}

/// The three lines that make up one serialized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    ActivityKey,
    Score,
    Timestamp,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordField::ActivityKey => write!(f, "activity_key"),
            RecordField::Score => write!(f, "score"),
            RecordField::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// A single record was missing a field or held a value of the wrong type.
#[derive(Debug, Error)]
pub enum RecordLoadError {
    #[error("no value for {0}")]
    MissingField(RecordField),

    #[error("score wasn't an integer, got \"{value}\"")]
    InvalidScore {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("timestamp wasn't in ISO-8601 format, got \"{value}\"")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// An activity evaluation was handed records for a different activity.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("practice record for \"{found}\" cannot be evaluated as \"{expected}\"")]
    KeyMismatch { expected: String, found: String },
}

/// The user could not be asked for, or did not give, an answer.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Input ended before a valid answer was given.
    #[error("no choice was made")]
    NoChoiceMade,

    #[error("failed to talk to the console")]
    Io(#[from] std::io::Error),
}

/// A practice session stopped early.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Store(#[from] PracticesFileError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_errors_name_the_field_or_value() {
        let missing = RecordLoadError::MissingField(RecordField::ActivityKey);
        assert_eq!(missing.to_string(), "no value for activity_key");

        let source = "five".parse::<i64>().unwrap_err();
        let bad_score = RecordLoadError::InvalidScore {
            value: "five".into(),
            source,
        };
        assert_eq!(bad_score.to_string(), "score wasn't an integer, got \"five\"");
    }

    #[test]
    fn wrapped_record_error_keeps_its_source() {
        let err = PracticesFileError::Record {
            index: 2,
            source: RecordLoadError::MissingField(RecordField::Score),
        };
        assert_eq!(err.to_string(), "failed to load practice set #2");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("no value for score"));
    }
}
