//! gradebook-report: rendering of roster snapshots.

pub mod html;

pub use html::{generate_html, write_html_report};
