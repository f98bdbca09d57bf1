//! Core data model types for gradebook.
//!
//! A [`StudentRecord`] carries raw course scores plus a cached total and
//! average. A [`CourseStatistics`] summarises one course slot across every
//! record. Both are produced and owned by the record store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest score that still earns an A.
pub const GRADE_A_MIN: f64 = 90.0;
/// Lowest score that still earns a B.
pub const GRADE_B_MIN: f64 = 80.0;
/// Lowest score that still earns a C.
pub const GRADE_C_MIN: f64 = 70.0;
/// Lowest score that still earns a D.
pub const GRADE_D_MIN: f64 = 60.0;

/// One student's identifier, name and per-course scores.
///
/// `total_score` and `avg_score` are memoized from `scores`; they are only
/// refreshed by the score calculator and are never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    id: i64,
    name: String,
    scores: Vec<f64>,
    total_score: f64,
    avg_score: f64,
}

impl StudentRecord {
    /// A record with zeroed derived fields.
    pub(crate) fn new(id: i64, name: String, scores: Vec<f64>) -> Self {
        Self {
            id,
            name,
            scores,
            total_score: 0.0,
            avg_score: 0.0,
        }
    }

    /// A record whose derived fields come from elsewhere (a saved file).
    pub(crate) fn with_cached(
        id: i64,
        name: String,
        scores: Vec<f64>,
        total_score: f64,
        avg_score: f64,
    ) -> Self {
        Self {
            id,
            name,
            scores,
            total_score,
            avg_score,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Cached sum of the scores.
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Cached mean of the scores.
    pub fn avg_score(&self) -> f64 {
        self.avg_score
    }

    pub(crate) fn set_derived(&mut self, total_score: f64, avg_score: f64) {
        self.total_score = total_score;
        self.avg_score = avg_score;
    }
}

/// Grade bucket used for histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    /// Every bucket, best first. Histogram arrays use this order.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E];

    /// Classify a score by the first boundary it satisfies, A checked first.
    ///
    /// Scores above 100 land in A and negative scores in E; there is no
    /// separate bucket for out-of-range values.
    pub fn classify(score: f64) -> Grade {
        if score >= GRADE_A_MIN {
            Grade::A
        } else if score >= GRADE_B_MIN {
            Grade::B
        } else if score >= GRADE_C_MIN {
            Grade::C
        } else if score >= GRADE_D_MIN {
            Grade::D
        } else {
            Grade::E
        }
    }

    /// Position of this bucket in histogram arrays.
    pub fn index(self) -> usize {
        match self {
            Grade::A => 0,
            Grade::B => 1,
            Grade::C => 2,
            Grade::D => 3,
            Grade::E => 4,
        }
    }

    /// Column label including the score range.
    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "A(90-100)",
            Grade::B => "B(80-89)",
            Grade::C => "C(70-79)",
            Grade::D => "D(60-69)",
            Grade::E => "E(<60)",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
        };
        f.write_str(letter)
    }
}

/// Aggregate figures for one course slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseStatistics {
    /// Sum of this course's score over every record.
    pub total_score: f64,
    /// `total_score / student_count`, or 0 for an empty store.
    pub avg_score: f64,
    /// Record counts per grade, indexed by [`Grade::index`].
    pub grade_counts: [usize; 5],
    /// `grade_counts / student_count` as fractions in `[0, 1]`.
    pub grade_percent: [f64; 5],
}

impl CourseStatistics {
    pub fn count(&self, grade: Grade) -> usize {
        self.grade_counts[grade.index()]
    }

    pub fn percent(&self, grade: Grade) -> f64 {
        self.grade_percent[grade.index()]
    }

    /// Number of records classified; equals the store's student count.
    pub fn classified(&self) -> usize {
        self.grade_counts.iter().sum()
    }
}
