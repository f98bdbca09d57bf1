//! Per-course totals, averages and grade distributions.

use crate::model::{CourseStatistics, Grade, StudentRecord};
use crate::store::RecordStore;

/// Compute statistics for every course slot from scratch.
///
/// Only raw scores are read, so stale record totals do not affect the result.
pub fn compute_course_statistics(
    records: &[StudentRecord],
    course_count: usize,
) -> Vec<CourseStatistics> {
    let student_count = records.len();

    (0..course_count)
        .map(|course| {
            let mut stats = CourseStatistics::default();
            for record in records {
                let score = record.scores().get(course).copied().unwrap_or(0.0);
                stats.total_score += score;
                stats.grade_counts[Grade::classify(score).index()] += 1;
            }

            if student_count > 0 {
                let n = student_count as f64;
                stats.avg_score = stats.total_score / n;
                for (percent, &count) in stats.grade_percent.iter_mut().zip(&stats.grade_counts) {
                    *percent = count as f64 / n;
                }
            }
            stats
        })
        .collect()
}

impl RecordStore {
    /// Rebuild every course's statistics from the current records.
    pub fn recompute_course_statistics(&mut self) {
        let stats = compute_course_statistics(self.records(), self.course_count());
        self.set_course_stats(stats);
        tracing::debug!(
            students = self.len(),
            course_count = self.course_count(),
            "course statistics recomputed"
        );
    }
}
