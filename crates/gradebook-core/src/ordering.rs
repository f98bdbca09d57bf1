//! Stable in-place ordering of the record store.
//!
//! Records with equal keys always keep their previous relative order, in
//! both directions. Descending order reverses the comparison rather than
//! the result, so ties are not flipped.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::StudentRecord;
use crate::store::RecordStore;

/// Field used to order records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Cached total score, numeric.
    Total,
    /// Student identifier, numeric.
    Id,
    /// Name, case-sensitive byte order.
    Name,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Total => write!(f, "total"),
            SortKey::Id => write!(f, "id"),
            SortKey::Name => write!(f, "name"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "total" | "score" => Ok(SortKey::Total),
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "asc"),
            SortOrder::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

fn compare(a: &StudentRecord, b: &StudentRecord, key: SortKey) -> Ordering {
    match key {
        // Totals are always finite; -0.0 and 0.0 compare equal.
        SortKey::Total => a
            .total_score()
            .partial_cmp(&b.total_score())
            .unwrap_or(Ordering::Equal),
        SortKey::Id => a.id().cmp(&b.id()),
        SortKey::Name => a.name().as_bytes().cmp(b.name().as_bytes()),
    }
}

/// Stable sort of `records` by `key` in the given direction.
pub fn sort_records(records: &mut [StudentRecord], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Ascending => records.sort_by(|a, b| compare(a, b, key)),
        SortOrder::Descending => records.sort_by(|a, b| compare(b, a, key)),
    }
}

impl RecordStore {
    /// Reorder the store in place.
    ///
    /// Ordering by total reads the cached totals, so it fails with
    /// [`StoreError::StaleData`] until scores have been recomputed.
    pub fn sort_by(&mut self, key: SortKey, order: SortOrder) -> Result<(), StoreError> {
        if key == SortKey::Total {
            self.ensure_scores_fresh()?;
        }
        sort_records(self.records_mut(), key, order);
        tracing::debug!(%key, %order, students = self.len(), "store sorted");
        Ok(())
    }

    pub fn sort_by_total_score(&mut self, order: SortOrder) -> Result<(), StoreError> {
        self.sort_by(SortKey::Total, order)
    }

    pub fn sort_by_id(&mut self) {
        sort_records(self.records_mut(), SortKey::Id, SortOrder::Ascending);
    }

    pub fn sort_by_name(&mut self) {
        sort_records(self.records_mut(), SortKey::Name, SortOrder::Ascending);
    }
}
