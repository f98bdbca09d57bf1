//! The `gradebook grades` command.

use anyhow::Result;

use super::{grade_table, Workspace};

pub fn execute(ws: &Workspace) -> Result<()> {
    let mut store = ws.load_store()?;
    store.recompute_record_scores();
    store.recompute_course_statistics();
    println!("{}", grade_table(store.course_statistics()?));
    Ok(())
}
