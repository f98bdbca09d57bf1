pub mod find;
pub mod grades;
pub mod init;
pub mod input;
pub mod list;
pub mod recompute;
pub mod report;
pub mod shell;
pub mod sort;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use gradebook_core::config::{load_config_from, GradebookConfig};
use gradebook_core::{CourseStatistics, Grade, RecordStore, StudentRecord};

/// Resolved configuration and data file shared by every subcommand.
pub struct Workspace {
    pub config: GradebookConfig,
    pub data_file: PathBuf,
}

impl Workspace {
    /// `--data` wins over the configured data file.
    pub fn open(data: Option<PathBuf>, config_path: Option<&Path>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let data_file = data.unwrap_or_else(|| config.data_file.clone());
        tracing::debug!(
            data_file = %data_file.display(),
            max_students = config.max_students,
            max_courses = config.max_courses,
            "workspace resolved"
        );
        Ok(Self { config, data_file })
    }

    pub fn empty_store(&self) -> RecordStore {
        RecordStore::with_limits(self.config.limits())
    }

    /// Load the roster from the data file.
    pub fn load_store(&self) -> Result<RecordStore> {
        let mut store = self.empty_store();
        match store.load(&self.data_file) {
            Ok(()) => Ok(store),
            Err(e) if e.is_io() => Err(anyhow::Error::new(e).context(format!(
                "failed to load roster from {}",
                self.data_file.display()
            ))),
            Err(e) => Err(anyhow::Error::new(e).context(format!(
                "roster file {} is not in the expected format",
                self.data_file.display()
            ))),
        }
    }

    /// Save the roster to the data file.
    pub fn save_store(&self, store: &RecordStore) -> Result<()> {
        store
            .save(&self.data_file)
            .with_context(|| format!("failed to save roster to {}", self.data_file.display()))
    }

    /// File name used as the report title.
    pub fn title(&self) -> String {
        self.data_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "gradebook".to_string())
    }
}

/// Roster table with one row per record, `#` being the store index.
pub fn roster_table<'a>(
    records: impl IntoIterator<Item = (usize, &'a StudentRecord)>,
    course_count: usize,
) -> Table {
    let mut table = Table::new();
    let mut header = vec!["#".to_string(), "ID".to_string(), "Name".to_string()];
    header.extend((1..=course_count).map(|c| format!("Course {c}")));
    header.push("Total".to_string());
    header.push("Average".to_string());
    table.set_header(header);

    for (index, r) in records {
        let mut row = vec![
            Cell::new(index),
            Cell::new(r.id()),
            Cell::new(r.name()),
        ];
        row.extend(r.scores().iter().map(|s| Cell::new(format!("{s:.2}"))));
        row.push(Cell::new(format!("{:.2}", r.total_score())));
        row.push(Cell::new(format!("{:.2}", r.avg_score())));
        table.add_row(row);
    }
    table
}

/// The whole store as a roster table.
pub fn store_table(store: &RecordStore) -> Table {
    roster_table(store.records().iter().enumerate(), store.course_count())
}

/// Per-course totals and averages.
pub fn course_table(courses: &[CourseStatistics]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Course", "Total", "Average"]);
    for (i, c) in courses.iter().enumerate() {
        table.add_row(vec![
            Cell::new(format!("Course {}", i + 1)),
            Cell::new(format!("{:.2}", c.total_score)),
            Cell::new(format!("{:.2}", c.avg_score)),
        ]);
    }
    table
}

/// Grade counts and percentages per course.
pub fn grade_table(courses: &[CourseStatistics]) -> Table {
    let mut table = Table::new();
    let mut header = vec!["Course".to_string()];
    header.extend(Grade::ALL.iter().map(|g| g.label().to_string()));
    table.set_header(header);

    for (i, c) in courses.iter().enumerate() {
        let mut row = vec![Cell::new(format!("Course {}", i + 1))];
        row.extend(
            Grade::ALL
                .iter()
                .map(|&g| Cell::new(format!("{} ({:.1}%)", c.count(g), c.percent(g) * 100.0))),
        );
        table.add_row(row);
    }
    table
}
