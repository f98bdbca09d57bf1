//! Record store error types.
//!
//! Every fallible engine operation returns one of these to its immediate
//! caller. None of them is fatal: the store is left either unchanged or in
//! the state documented by the failing operation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which shape argument an [`StoreError::InvalidCount`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    Students,
    Courses,
}

impl fmt::Display for CountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountKind::Students => write!(f, "student"),
            CountKind::Courses => write!(f, "course"),
        }
    }
}

/// Which cached values an [`StoreError::StaleData`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleKind {
    /// Per-record total and average scores.
    RecordScores,
    /// Per-course totals, averages and grade histograms.
    CourseStatistics,
}

impl fmt::Display for StaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleKind::RecordScores => write!(f, "record scores"),
            StaleKind::CourseStatistics => write!(f, "course statistics"),
        }
    }
}

/// Errors produced by the record store and its codec.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A store-shape argument is zero or above its configured maximum.
    #[error("invalid {kind} count {value}: must be between 1 and {max}")]
    InvalidCount {
        kind: CountKind,
        value: usize,
        max: usize,
    },

    /// A record or course index is outside the current store.
    #[error("index {index} out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// An insertion was attempted on a full store.
    #[error("store is full ({capacity} records)")]
    CapacityExceeded { capacity: usize },

    /// A score sequence does not match the store's course count.
    #[error("expected {expected} scores, got {found}")]
    ScoreCountMismatch { expected: usize, found: usize },

    /// A score is NaN or infinite.
    #[error("invalid score {0}: scores must be finite")]
    InvalidScore(f64),

    /// A name cannot be stored without breaking the text format.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// Derived values were read after a mutation without recomputation.
    #[error("{0} are stale; recompute them first")]
    StaleData(StaleKind),

    /// A file could not be opened, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted text does not match the expected grammar.
    #[error("malformed data at line {line}: {message}")]
    MalformedData { line: usize, message: String },
}

impl StoreError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        StoreError::MalformedData {
            line,
            message: message.into(),
        }
    }

    /// Returns `true` if the error came from the filesystem rather than the data.
    pub fn is_io(&self) -> bool {
        matches!(self, StoreError::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = StoreError::InvalidCount {
            kind: CountKind::Courses,
            value: 7,
            max: 6,
        };
        assert_eq!(
            err.to_string(),
            "invalid course count 7: must be between 1 and 6"
        );

        let err = StoreError::StaleData(StaleKind::CourseStatistics);
        assert_eq!(
            err.to_string(),
            "course statistics are stale; recompute them first"
        );

        let err = StoreError::malformed(3, "expected name line");
        assert_eq!(err.to_string(), "malformed data at line 3: expected name line");
    }

    #[test]
    fn io_errors_are_classified() {
        let err = StoreError::Io {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.is_io());
        assert!(err.to_string().contains("missing.txt"));
        assert!(!StoreError::InvalidScore(f64::NAN).is_io());
    }
}
