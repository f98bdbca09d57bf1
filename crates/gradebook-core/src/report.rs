//! Read-only roster snapshots with JSON persistence.
//!
//! A [`RosterReport`] is a copy of the store's records and, when they are
//! up to date, its course statistics. Renderers work from the snapshot so
//! they never hold a reference into the live store.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CourseStatistics, Grade, StudentRecord};
use crate::store::RecordStore;

/// A point-in-time copy of a record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterReport {
    /// Human-readable title, usually the data file name.
    pub title: String,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
    pub student_count: usize,
    pub course_count: usize,
    /// Records in store order.
    pub records: Vec<StudentRecord>,
    /// Whether record totals matched the raw scores when the snapshot was taken.
    pub scores_fresh: bool,
    /// Course statistics, present only if they were fresh.
    #[serde(default)]
    pub courses: Option<Vec<CourseStatistics>>,
}

impl RosterReport {
    /// Snapshot the store.
    pub fn from_store(store: &RecordStore, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created_at: Utc::now(),
            student_count: store.len(),
            course_count: store.course_count(),
            records: store.records().to_vec(),
            scores_fresh: store.scores_fresh(),
            courses: store.course_statistics().ok().map(<[_]>::to_vec),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: RosterReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the roster and grade distribution as markdown tables.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.title));
        md.push_str(&format!(
            "**Summary:** {} students, {} courses\n\n",
            self.student_count, self.course_count
        ));

        md.push_str("| ID | Name |");
        for course in 1..=self.course_count {
            md.push_str(&format!(" Course {course} |"));
        }
        md.push_str(" Total | Average |\n|----|------|");
        md.push_str(&"----------|".repeat(self.course_count));
        md.push_str("-------|---------|\n");

        for r in &self.records {
            md.push_str(&format!("| {} | {} |", r.id(), r.name()));
            for score in r.scores() {
                md.push_str(&format!(" {score:.2} |"));
            }
            md.push_str(&format!(" {:.2} | {:.2} |\n", r.total_score(), r.avg_score()));
        }

        if let Some(courses) = &self.courses {
            md.push_str("\n### Courses\n\n");
            md.push_str("| Course | Total | Average |");
            for grade in Grade::ALL {
                md.push_str(&format!(" {} |", grade.label()));
            }
            md.push_str("\n|--------|-------|---------|");
            md.push_str(&"------|".repeat(Grade::ALL.len()));
            md.push('\n');

            for (i, c) in courses.iter().enumerate() {
                md.push_str(&format!(
                    "| Course {} | {:.2} | {:.2} |",
                    i + 1,
                    c.total_score,
                    c.avg_score
                ));
                for grade in Grade::ALL {
                    md.push_str(&format!(" {:.1}% |", c.percent(grade) * 100.0));
                }
                md.push('\n');
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordInput;

    fn sample() -> RecordStore {
        let mut store = RecordStore::new();
        store
            .bulk_load(
                2,
                &[
                    RecordInput::new(1001, "Alice", vec![95.0, 85.0]),
                    RecordInput::new(1002, "Bob", vec![60.0, 55.0]),
                ],
            )
            .unwrap();
        store
    }

    #[test]
    fn snapshot_copies_store() {
        let store = sample();
        let report = RosterReport::from_store(&store, "class");
        assert_eq!(report.student_count, 2);
        assert_eq!(report.records, store.records());
        assert!(report.scores_fresh);
        assert_eq!(report.courses.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn stale_statistics_are_omitted() {
        let mut store = sample();
        store.set_record(0, 1001, "Alice", &[1.0, 2.0]).unwrap();
        let report = RosterReport::from_store(&store, "class");
        assert!(!report.scores_fresh);
        assert!(report.courses.is_none());
    }

    #[test]
    fn json_roundtrip() {
        let report = RosterReport::from_store(&sample(), "class");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = RosterReport::load_json(&path).unwrap();

        assert_eq!(loaded.title, "class");
        assert_eq!(loaded.records, report.records);
        assert_eq!(loaded.courses, report.courses);
    }

    #[test]
    fn markdown_output() {
        let md = RosterReport::from_store(&sample(), "class").to_markdown();
        assert!(md.contains("| 1001 | Alice | 95.00 | 85.00 | 180.00 | 90.00 |"));
        assert!(md.contains("| Course 2 | 140.00 | 70.00 |"));
        assert!(md.contains("50.0%"));
    }
}
