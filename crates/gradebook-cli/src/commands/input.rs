//! The `gradebook input` command.

use std::io::{self, BufRead};

use anyhow::{Context, Result};

use gradebook_core::RecordInput;

use super::Workspace;

pub fn execute(ws: &Workspace, courses: usize) -> Result<()> {
    let stdin = io::stdin();
    let entries = parse_rows(stdin.lock())?;

    let mut store = ws.empty_store();
    store.bulk_load(courses, &entries)?;
    ws.save_store(&store)?;

    println!(
        "Loaded {} students with {} courses into {}",
        store.len(),
        store.course_count(),
        ws.data_file.display()
    );
    Ok(())
}

/// Parse whitespace-separated `id name score...` rows, skipping blank lines.
pub fn parse_rows(reader: impl BufRead) -> Result<Vec<RecordInput>> {
    let mut entries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        let row = i + 1;
        let mut fields = line.split_whitespace();
        let Some(id) = fields.next() else {
            continue;
        };
        let id: i64 = id
            .parse()
            .with_context(|| format!("row {row}: invalid student id '{id}'"))?;
        let name = fields
            .next()
            .with_context(|| format!("row {row}: missing name"))?;
        let scores = fields
            .map(|s| {
                s.parse::<f64>()
                    .with_context(|| format!("row {row}: invalid score '{s}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        entries.push(RecordInput::new(id, name, scores));
    }
    Ok(entries)
}
