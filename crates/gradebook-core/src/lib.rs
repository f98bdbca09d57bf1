//! gradebook-core: record store, score statistics, ordering and persistence.
//!
//! This crate holds the bounded student record store and every operation
//! that derives data from it. Presentation layers (the CLI, the HTML
//! report) only call into the public operations defined here.

pub mod codec;
pub mod command;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod ordering;
pub mod report;
pub mod scoring;
pub mod statistics;
pub mod store;

pub use command::{Command, Outcome};
pub use error::StoreError;
pub use model::{CourseStatistics, Grade, StudentRecord};
pub use ordering::{SortKey, SortOrder};
pub use store::{RecordInput, RecordStore, StoreLimits};
