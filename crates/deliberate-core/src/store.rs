//! The practice record store.
//!
//! Records live in memory and are written back explicitly with
//! [`Practices::save`]. The backing file is line oriented:
//!
//! ```text
//! <record count>
//! <activity key>
//! <score>
//! <timestamp>
//! ...three lines per record...
//! ```
//!
//! Saving always rewrites the whole file in this shape.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

use crate::error::{PracticesFileError, RecordField, RecordLoadError};
use crate::model::{format_timestamp, parse_timestamp, PracticeRecord};

/// All completed practice records, in append order.
#[derive(Debug, Clone)]
pub struct Practices {
    path: PathBuf,
    records: Vec<PracticeRecord>,
}

impl Practices {
    /// An empty store that will save to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Load the store backed by `path`.
    ///
    /// A missing file is not an error: the store starts empty and the file
    /// is created on the first save.
    pub fn load(path: &Path) -> Result<Self, PracticesFileError> {
        if !path.is_file() {
            tracing::info!(
                "no practices file found at {}, starting from an empty state",
                path.display()
            );
            return Ok(Self::empty(path));
        }

        let content = std::fs::read_to_string(path).map_err(|source| PracticesFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = parse_practices(&content)?;

        tracing::debug!(
            "loaded {} practice sets from {}",
            records.len(),
            path.display()
        );
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Add a record. Nothing is written until [`Practices::save`].
    pub fn append(
        &mut self,
        activity_key: impl Into<String>,
        score: i64,
        timestamp: DateTime<FixedOffset>,
    ) {
        self.records
            .push(PracticeRecord::new(activity_key, score, timestamp));
    }

    /// Overwrite the backing file with every record in memory.
    ///
    /// Fails without touching the file if a key could not be read back.
    pub fn save(&self) -> Result<(), PracticesFileError> {
        if let Some((index, record)) = self
            .records
            .iter()
            .enumerate()
            .find(|(_, r)| !is_storable_key(&r.activity_key))
        {
            return Err(PracticesFileError::UnstorableKey {
                index,
                key: record.activity_key.clone(),
            });
        }

        let io_error = |source| PracticesFileError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }
        std::fs::write(&self.path, serialize_practices(&self.records)).map_err(io_error)?;

        tracing::debug!(
            "saved {} practice sets to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn all(&self) -> &[PracticeRecord] {
        &self.records
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A key must fit on one non-blank line of the practices file.
fn is_storable_key(key: &str) -> bool {
    !key.trim().is_empty() && !key.contains(['\n', '\r'])
}

/// Serialize records into the practices file format.
pub fn serialize_practices(records: &[PracticeRecord]) -> String {
    let mut out = format!("{}\n", records.len());
    for record in records {
        out.push_str(&format!(
            "{}\n{}\n{}\n",
            record.activity_key,
            record.score,
            format_timestamp(&record.timestamp)
        ));
    }
    out
}

/// Parse the full contents of a practices file.
pub fn parse_practices(content: &str) -> Result<Vec<PracticeRecord>, PracticesFileError> {
    let mut lines = content.lines();

    let count_line = lines.next().unwrap_or_default();
    let count: usize =
        count_line
            .trim()
            .parse()
            .map_err(|_| PracticesFileError::InvalidCount {
                found: count_line.to_string(),
            })?;

    let mut reader = RecordReader::new(lines.by_ref());
    let mut records = Vec::new();
    for index in 0..count {
        let record = reader
            .read_record()
            .map_err(|source| PracticesFileError::Record { index, source })?;
        records.push(record);
    }

    let remaining = lines.collect::<Vec<_>>().join("\n");
    if !remaining.trim().is_empty() {
        return Err(PracticesFileError::TrailingData { remaining });
    }

    Ok(records)
}

/// Where the reader is within one three-line record.
#[derive(Debug)]
enum ReadState {
    AwaitingKey,
    AwaitingScore { key: String },
    AwaitingTimestamp { key: String, score: i64 },
    Done(PracticeRecord),
}

/// Reads records from a cursor over practices file lines.
///
/// A missing line reads as empty, so a truncated file reports the first
/// field it could not find.
pub struct RecordReader<I> {
    lines: I,
}

impl<'a, I> RecordReader<I>
where
    I: Iterator<Item = &'a str>,
{
    pub fn new(lines: I) -> Self {
        Self { lines }
    }

    /// Consume the next three lines as one record.
    pub fn read_record(&mut self) -> Result<PracticeRecord, RecordLoadError> {
        let mut state = ReadState::AwaitingKey;
        loop {
            state = match state {
                ReadState::Done(record) => return Ok(record),
                ReadState::AwaitingKey => {
                    let key = self.next_value(RecordField::ActivityKey)?;
                    ReadState::AwaitingScore {
                        key: key.to_string(),
                    }
                }
                ReadState::AwaitingScore { key } => {
                    let value = self.next_value(RecordField::Score)?;
                    let score = value.trim().parse::<i64>().map_err(|source| {
                        RecordLoadError::InvalidScore {
                            value: value.to_string(),
                            source,
                        }
                    })?;
                    ReadState::AwaitingTimestamp { key, score }
                }
                ReadState::AwaitingTimestamp { key, score } => {
                    let value = self.next_value(RecordField::Timestamp)?;
                    let timestamp = parse_timestamp(value.trim()).map_err(|source| {
                        RecordLoadError::InvalidTimestamp {
                            value: value.to_string(),
                            source,
                        }
                    })?;
                    ReadState::Done(PracticeRecord::new(key, score, timestamp))
                }
            };
        }
    }

    fn next_value(&mut self, field: RecordField) -> Result<&'a str, RecordLoadError> {
        let line = self.lines.next().unwrap_or_default();
        if line.trim().is_empty() {
            return Err(RecordLoadError::MissingField(field));
        }
        Ok(line)
    }
}
