//! Core data model types for deliberate.
//!
//! An [`Activity`] is something to practice, a [`PracticeRecord`] is one
//! scored attempt at it. Records refer to their activity only through its
//! textual key.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

/// A single practice task.
///
/// The key is currently the description itself, so two activities with the
/// same description are the same activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Activity {
    description: String,
}

impl Activity {
    /// Create an activity from its description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// What the user should practice.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The durable identifier stored in practice records.
    pub fn key(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// One scored, timestamped attempt at an activity.
///
/// Equality is structural. Timestamps compare as instants, so the same moment
/// written with different offsets is equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeRecord {
    pub activity_key: String,
    pub score: i64,
    pub timestamp: DateTime<FixedOffset>,
}

impl PracticeRecord {
    pub fn new(
        activity_key: impl Into<String>,
        score: i64,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            activity_key: activity_key.into(),
            score,
            timestamp,
        }
    }
}

/// Render a timestamp the way the practices file and evaluations show it.
///
/// Sub-second digits appear only when present, and UTC is written `+00:00`.
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Parse a timestamp written by [`format_timestamp`] or any RFC 3339 producer.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
}

/// The self-assessment levels offered when scoring a practice set.
///
/// The stored score is the level's index. Records themselves accept any
/// integer; only the interactive layer is limited to these five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreLevel {
    NotSuccessful,
    QuarterSuccessful,
    HalfSuccessful,
    MostlySuccessful,
    Flawless,
}

impl ScoreLevel {
    pub const ALL: [ScoreLevel; 5] = [
        ScoreLevel::NotSuccessful,
        ScoreLevel::QuarterSuccessful,
        ScoreLevel::HalfSuccessful,
        ScoreLevel::MostlySuccessful,
        ScoreLevel::Flawless,
    ];

    /// The score stored for this level.
    pub fn value(self) -> i64 {
        match self {
            ScoreLevel::NotSuccessful => 0,
            ScoreLevel::QuarterSuccessful => 1,
            ScoreLevel::HalfSuccessful => 2,
            ScoreLevel::MostlySuccessful => 3,
            ScoreLevel::Flawless => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreLevel::NotSuccessful => "I wasn't successful",
            ScoreLevel::QuarterSuccessful => "I was ~25% successful",
            ScoreLevel::HalfSuccessful => "I was ~50% successful",
            ScoreLevel::MostlySuccessful => "I was ~75% successful",
            ScoreLevel::Flawless => "I executed the task flawlessly",
        }
    }

    pub fn from_value(value: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.value() == value)
    }

    /// Labels in score order, ready to be offered as choices.
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|level| level.label()).collect()
    }
}

impl fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
