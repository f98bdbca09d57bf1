//! The bounded record store.
//!
//! [`RecordStore`] owns up to `max_students` records, each with exactly
//! `course_count` scores, plus one [`CourseStatistics`] slot per course.
//! Derived values are tracked against a dataset version: every raw
//! mutation bumps the version, and the score calculator and statistics
//! aggregator each remember the version they last ran at.

use serde::{Deserialize, Serialize};

use crate::error::{CountKind, StaleKind, StoreError};
use crate::model::{CourseStatistics, StudentRecord};

/// Default maximum number of records in a store.
pub const MAX_STUDENTS: usize = 30;
/// Default maximum number of course slots per record.
pub const MAX_COURSES: usize = 6;
/// Default maximum name length, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Capacity bounds for a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLimits {
    pub max_students: usize,
    pub max_courses: usize,
    pub max_name_len: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_students: MAX_STUDENTS,
            max_courses: MAX_COURSES,
            max_name_len: MAX_NAME_LEN,
        }
    }
}

/// A record as supplied by a caller, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInput {
    pub id: i64,
    pub name: String,
    pub scores: Vec<f64>,
}

impl RecordInput {
    pub fn new(id: i64, name: impl Into<String>, scores: Vec<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            scores,
        }
    }
}

/// Bounded, index-addressable collection of student records.
#[derive(Debug, Clone)]
pub struct RecordStore {
    limits: StoreLimits,
    records: Vec<StudentRecord>,
    course_count: usize,
    course_stats: Vec<CourseStatistics>,
    version: u64,
    scores_version: Option<u64>,
    stats_version: Option<u64>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// An empty store with the default limits.
    pub fn new() -> Self {
        Self::with_limits(StoreLimits::default())
    }

    /// An empty store with custom limits.
    pub fn with_limits(limits: StoreLimits) -> Self {
        Self {
            limits,
            records: Vec::with_capacity(limits.max_students),
            course_count: 0,
            course_stats: Vec::new(),
            version: 0,
            scores_version: Some(0),
            stats_version: Some(0),
        }
    }

    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    /// Current student count.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn course_count(&self) -> usize {
        self.course_count
    }

    /// Maximum number of records this store accepts.
    pub fn capacity(&self) -> usize {
        self.limits.max_students
    }

    /// Dataset version, bumped by every raw mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether cached totals and averages match the current raw scores.
    pub fn scores_fresh(&self) -> bool {
        self.scores_version == Some(self.version)
    }

    /// Whether course statistics match the current raw scores.
    pub fn statistics_fresh(&self) -> bool {
        self.stats_version == Some(self.version)
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Result<&StudentRecord, StoreError> {
        self.records.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            count: self.records.len(),
        })
    }

    /// Statistics for one course slot. Fails if they are out of date.
    pub fn statistics(&self, course: usize) -> Result<&CourseStatistics, StoreError> {
        let stats = self
            .course_stats
            .get(course)
            .ok_or(StoreError::IndexOutOfRange {
                index: course,
                count: self.course_stats.len(),
            })?;
        self.ensure_statistics_fresh()?;
        Ok(stats)
    }

    /// Statistics for every course slot. Fails if they are out of date.
    pub fn course_statistics(&self) -> Result<&[CourseStatistics], StoreError> {
        self.ensure_statistics_fresh()?;
        Ok(&self.course_stats)
    }

    /// Reset the store to `student_count` blank records of `course_count` zeroed scores.
    pub fn initialize(&mut self, student_count: usize, course_count: usize) -> Result<(), StoreError> {
        self.check_shape(student_count, course_count)?;

        self.records = (0..student_count)
            .map(|_| StudentRecord::new(0, String::new(), vec![0.0; course_count]))
            .collect();
        self.course_count = course_count;
        self.course_stats = vec![CourseStatistics::default(); course_count];
        self.touch();
        tracing::debug!(student_count, course_count, "store initialized");
        Ok(())
    }

    /// Overwrite the record at `index`. Derived fields are not recomputed.
    pub fn set_record(
        &mut self,
        index: usize,
        id: i64,
        name: &str,
        scores: &[f64],
    ) -> Result<(), StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                count: self.records.len(),
            });
        }
        self.validate_name(name)?;
        validate_scores(scores, self.course_count)?;

        self.records[index] = StudentRecord::new(id, name.to_string(), scores.to_vec());
        self.touch();
        Ok(())
    }

    /// Append a record after the last one and return its index.
    pub fn add_record(&mut self, id: i64, name: &str, scores: &[f64]) -> Result<usize, StoreError> {
        if self.course_count == 0 {
            return Err(StoreError::InvalidCount {
                kind: CountKind::Courses,
                value: 0,
                max: self.limits.max_courses,
            });
        }
        if self.records.len() >= self.limits.max_students {
            tracing::warn!(capacity = self.limits.max_students, "rejected insert into full store");
            return Err(StoreError::CapacityExceeded {
                capacity: self.limits.max_students,
            });
        }
        self.validate_name(name)?;
        validate_scores(scores, self.course_count)?;

        self.records
            .push(StudentRecord::new(id, name.to_string(), scores.to_vec()));
        self.touch();
        Ok(self.records.len() - 1)
    }

    /// Replace the whole store with `entries`, then recompute every derived value.
    ///
    /// Nothing is changed unless every entry is valid.
    pub fn bulk_load(&mut self, course_count: usize, entries: &[RecordInput]) -> Result<(), StoreError> {
        self.check_shape(entries.len(), course_count)?;

        let mut records = Vec::with_capacity(self.limits.max_students);
        for entry in entries {
            self.validate_name(&entry.name)?;
            validate_scores(&entry.scores, course_count)?;
            records.push(StudentRecord::new(entry.id, entry.name.clone(), entry.scores.clone()));
        }

        self.records = records;
        self.course_count = course_count;
        self.course_stats = vec![CourseStatistics::default(); course_count];
        self.touch();
        self.recompute_record_scores();
        self.recompute_course_statistics();
        tracing::info!(students = entries.len(), course_count, "bulk load complete");
        Ok(())
    }

    /// Rejects names that the text format cannot carry.
    pub fn validate_name(&self, name: &str) -> Result<(), StoreError> {
        let reason = if name.is_empty() {
            Some("name is empty".to_string())
        } else if name.chars().count() > self.limits.max_name_len {
            Some(format!("longer than {} characters", self.limits.max_name_len))
        } else if name.chars().any(char::is_whitespace) {
            Some("contains whitespace".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StoreError::InvalidName {
                name: name.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    fn check_shape(&self, student_count: usize, course_count: usize) -> Result<(), StoreError> {
        if student_count == 0 || student_count > self.limits.max_students {
            return Err(StoreError::InvalidCount {
                kind: CountKind::Students,
                value: student_count,
                max: self.limits.max_students,
            });
        }
        if course_count == 0 || course_count > self.limits.max_courses {
            return Err(StoreError::InvalidCount {
                kind: CountKind::Courses,
                value: course_count,
                max: self.limits.max_courses,
            });
        }
        Ok(())
    }

    fn ensure_statistics_fresh(&self) -> Result<(), StoreError> {
        if self.statistics_fresh() {
            Ok(())
        } else {
            Err(StoreError::StaleData(StaleKind::CourseStatistics))
        }
    }

    pub(crate) fn ensure_scores_fresh(&self) -> Result<(), StoreError> {
        if self.scores_fresh() {
            Ok(())
        } else {
            Err(StoreError::StaleData(StaleKind::RecordScores))
        }
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    pub(crate) fn records_mut(&mut self) -> &mut [StudentRecord] {
        &mut self.records
    }

    pub(crate) fn mark_scores_fresh(&mut self) {
        self.scores_version = Some(self.version);
    }

    pub(crate) fn set_course_stats(&mut self, stats: Vec<CourseStatistics>) {
        self.course_stats = stats;
        self.stats_version = Some(self.version);
    }

    /// Assemble a store from decoded parts. Cached totals are trusted,
    /// course statistics start out stale.
    pub(crate) fn from_parts(
        limits: StoreLimits,
        course_count: usize,
        records: Vec<StudentRecord>,
    ) -> Self {
        Self {
            limits,
            records,
            course_count,
            course_stats: vec![CourseStatistics::default(); course_count],
            version: 1,
            scores_version: Some(1),
            stats_version: None,
        }
    }

    /// Swap in the contents of `other`, keeping this store's version monotonic.
    pub(crate) fn replace_contents(&mut self, other: RecordStore) {
        let version = self.version.max(other.version) + 1;
        let scores_fresh = other.scores_fresh();
        let stats_fresh = other.statistics_fresh();

        self.records = other.records;
        self.course_count = other.course_count;
        self.course_stats = other.course_stats;
        self.version = version;
        self.scores_version = scores_fresh.then_some(version);
        self.stats_version = stats_fresh.then_some(version);
    }
}

pub(crate) fn validate_scores(scores: &[f64], course_count: usize) -> Result<(), StoreError> {
    if scores.len() != course_count {
        return Err(StoreError::ScoreCountMismatch {
            expected: course_count,
            found: scores.len(),
        });
    }
    if let Some(&bad) = scores.iter().find(|s| !s.is_finite()) {
        return Err(StoreError::InvalidScore(bad));
    }
    Ok(())
}
