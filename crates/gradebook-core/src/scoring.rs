//! Per-record total and average scores.

use crate::store::RecordStore;

/// Sum and mean of the first `course_count` scores.
///
/// The mean is 0 when there are no courses.
pub fn total_and_average(scores: &[f64], course_count: usize) -> (f64, f64) {
    let total: f64 = scores.iter().take(course_count).sum();
    let average = if course_count > 0 {
        total / course_count as f64
    } else {
        0.0
    };
    (total, average)
}

impl RecordStore {
    /// Refresh every record's cached total and average from its raw scores.
    ///
    /// Idempotent; call it after any score mutation and before relying on
    /// totals (display, ordering by total).
    pub fn recompute_record_scores(&mut self) {
        let course_count = self.course_count();
        for record in self.records_mut() {
            let (total, average) = total_and_average(record.scores(), course_count);
            record.set_derived(total, average);
        }
        self.mark_scores_fresh();
        tracing::debug!(students = self.len(), course_count, "record scores recomputed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordInput;

    #[test]
    fn sums_and_averages() {
        assert_eq!(total_and_average(&[95.0, 85.0], 2), (180.0, 90.0));
        assert_eq!(total_and_average(&[60.0, 55.0], 2), (115.0, 57.5));
    }

    #[test]
    fn zero_courses_average_is_zero() {
        assert_eq!(total_and_average(&[], 0), (0.0, 0.0));
    }

    #[test]
    fn recompute_after_edit() {
        let mut store = RecordStore::new();
        store.initialize(2, 3).unwrap();
        store.set_record(0, 1, "Ann", &[90.0, 80.0, 70.0]).unwrap();
        store.set_record(1, 2, "Ben", &[100.0, 100.0, 99.5]).unwrap();
        assert!(!store.scores_fresh());

        store.recompute_record_scores();
        assert!(store.scores_fresh());

        for record in store.records() {
            let expected: f64 = record.scores().iter().sum();
            assert_eq!(record.total_score(), expected);
            assert_eq!(record.avg_score(), expected / 3.0);
        }
        assert_eq!(store.record(1).unwrap().total_score(), 299.5);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut store = RecordStore::new();
        store
            .bulk_load(1, &[RecordInput::new(9, "Solo", vec![42.0])])
            .unwrap();
        let before = store.records().to_vec();
        store.recompute_record_scores();
        store.recompute_record_scores();
        assert_eq!(store.records(), before.as_slice());
    }
}
