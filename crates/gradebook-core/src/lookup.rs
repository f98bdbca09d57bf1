//! Linear search over the store in its current order.

use crate::store::RecordStore;

impl RecordStore {
    /// Index of the first record with this identifier.
    pub fn find_by_id(&self, id: i64) -> Option<usize> {
        self.records().iter().position(|r| r.id() == id)
    }

    /// Index of the first record whose name equals `name` exactly.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.records().iter().position(|r| r.name() == name)
    }
}
