//! Line-oriented text persistence.
//!
//! The layout is positional and label-driven:
//!
//! ```text
//! 学生数量：2
//! 科目数量：2
//! 姓名: Alice
//! 学号: 1001
//! 分数: 95.00 85.00
//! 总分: 180.00
//! 平均分: 90.00
//!
//! ```
//!
//! The record block repeats once per student. Scores are written with two
//! decimals, each followed by a single space. There is no escaping, so
//! names must be whitespace-free; the store enforces that on entry.
//!
//! Loading is validate-then-commit: the file is parsed into a separate
//! store and only a complete, valid parse replaces the current contents.

use std::path::Path;

use crate::error::StoreError;
use crate::model::StudentRecord;
use crate::store::{RecordStore, StoreLimits};

const STUDENT_COUNT_LABEL: &str = "学生数量：";
const COURSE_COUNT_LABEL: &str = "科目数量：";
const NAME_LABEL: &str = "姓名:";
const ID_LABEL: &str = "学号:";
const SCORES_LABEL: &str = "分数:";
const TOTAL_LABEL: &str = "总分:";
const AVERAGE_LABEL: &str = "平均分:";

/// Render the store in the persisted text layout.
///
/// Cached totals and averages are written as they are, fresh or not.
pub fn encode(store: &RecordStore) -> String {
    let mut out = String::new();

    out.push_str(&format!("{STUDENT_COUNT_LABEL}{}\n", store.len()));
    out.push_str(&format!("{COURSE_COUNT_LABEL}{}\n", store.course_count()));

    for record in store.records() {
        out.push_str(&format!("{NAME_LABEL} {}\n", record.name()));
        out.push_str(&format!("{ID_LABEL} {}\n", record.id()));
        out.push_str(&format!("{SCORES_LABEL} "));
        for score in record.scores() {
            out.push_str(&format!("{score:.2} "));
        }
        out.push('\n');
        out.push_str(&format!("{TOTAL_LABEL} {:.2}\n", record.total_score()));
        out.push_str(&format!("{AVERAGE_LABEL} {:.2}\n\n", record.avg_score()));
    }

    out
}

/// Walks non-blank lines, tracking 1-based line numbers for errors.
struct Cursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    last_line: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            last_line: 0,
        }
    }

    fn next_non_blank(&mut self) -> Option<(usize, &'a str)> {
        for (i, line) in self.lines.by_ref() {
            self.last_line = i + 1;
            if !line.trim().is_empty() {
                return Some((i + 1, line));
            }
        }
        None
    }

    /// Next non-blank line, which must start with `label`; returns the rest.
    fn field(&mut self, label: &str, what: &str) -> Result<(usize, &'a str), StoreError> {
        let Some((line_no, line)) = self.next_non_blank() else {
            return Err(StoreError::malformed(
                self.last_line + 1,
                format!("unexpected end of data, expected {what}"),
            ));
        };
        match line.strip_prefix(label) {
            Some(rest) => Ok((line_no, rest.trim())),
            None => Err(StoreError::malformed(
                line_no,
                format!("expected {what} (`{label}`), found {line:?}"),
            )),
        }
    }
}

fn parse_count(line: usize, value: &str, what: &str, max: usize) -> Result<usize, StoreError> {
    let count: usize = value
        .parse()
        .map_err(|_| StoreError::malformed(line, format!("{what} is not a number: {value:?}")))?;
    if count > max {
        return Err(StoreError::malformed(
            line,
            format!("{what} {count} exceeds the limit of {max}"),
        ));
    }
    Ok(count)
}

fn parse_score(line: usize, value: &str, what: &str) -> Result<f64, StoreError> {
    match value.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(StoreError::malformed(
            line,
            format!("{what} is not a finite number: {value:?}"),
        )),
    }
}

fn parse_record(
    cursor: &mut Cursor<'_>,
    course_count: usize,
    limits: &StoreLimits,
) -> Result<StudentRecord, StoreError> {
    let (line, name) = cursor.field(NAME_LABEL, "name")?;
    if name.chars().any(char::is_whitespace) {
        return Err(StoreError::malformed(line, format!("name contains whitespace: {name:?}")));
    }
    if name.chars().count() > limits.max_name_len {
        return Err(StoreError::malformed(
            line,
            format!("name longer than {} characters", limits.max_name_len),
        ));
    }

    let (line, id) = cursor.field(ID_LABEL, "student id")?;
    let id: i64 = id
        .parse()
        .map_err(|_| StoreError::malformed(line, format!("student id is not an integer: {id:?}")))?;

    let (line, raw_scores) = cursor.field(SCORES_LABEL, "scores")?;
    let scores = raw_scores
        .split_whitespace()
        .map(|s| parse_score(line, s, "score"))
        .collect::<Result<Vec<_>, _>>()?;
    if scores.len() != course_count {
        return Err(StoreError::malformed(
            line,
            format!("expected {course_count} scores, found {}", scores.len()),
        ));
    }

    let (line, total) = cursor.field(TOTAL_LABEL, "total score")?;
    let total = parse_score(line, total, "total score")?;

    let (line, average) = cursor.field(AVERAGE_LABEL, "average score")?;
    let average = parse_score(line, average, "average score")?;

    Ok(StudentRecord::with_cached(
        id,
        name.to_string(),
        scores,
        total,
        average,
    ))
}

/// Parse persisted text into a new store bounded by `limits`.
///
/// Totals and averages are taken verbatim; course statistics start stale.
pub fn decode(text: &str, limits: StoreLimits) -> Result<RecordStore, StoreError> {
    let mut cursor = Cursor::new(text);

    let (line, value) = cursor.field(STUDENT_COUNT_LABEL, "student count header")?;
    let student_count = parse_count(line, value, "student count", limits.max_students)?;

    let (line, value) = cursor.field(COURSE_COUNT_LABEL, "course count header")?;
    let course_count = parse_count(line, value, "course count", limits.max_courses)?;

    let mut records = Vec::with_capacity(student_count);
    for _ in 0..student_count {
        records.push(parse_record(&mut cursor, course_count, &limits)?);
    }

    if let Some((line, content)) = cursor.next_non_blank() {
        return Err(StoreError::malformed(
            line,
            format!("unexpected content after {student_count} records: {content:?}"),
        ));
    }

    Ok(RecordStore::from_parts(limits, course_count, records))
}

fn read_text(path: &Path) -> Result<String, StoreError> {
    let bytes = std::fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        StoreError::malformed(line, "data is not valid UTF-8")
    })
}

impl RecordStore {
    /// Write the store to `path` in the persisted text layout.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        std::fs::write(path, encode(self)).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), students = self.len(), "store saved");
        Ok(())
    }

    /// Replace the store's entire contents with the data at `path`.
    ///
    /// On any error the store is left exactly as it was.
    pub fn load(&mut self, path: &Path) -> Result<(), StoreError> {
        let text = read_text(path)?;
        let loaded = decode(&text, self.limits()).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "rejected data file");
        })?;
        self.replace_contents(loaded);
        tracing::info!(
            path = %path.display(),
            students = self.len(),
            course_count = self.course_count(),
            "store loaded"
        );
        Ok(())
    }
}
