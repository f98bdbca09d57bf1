//! The `gradebook stats` command.

use anyhow::Result;

use super::{course_table, Workspace};

pub fn execute(ws: &Workspace) -> Result<()> {
    let mut store = ws.load_store()?;
    store.recompute_record_scores();
    store.recompute_course_statistics();
    println!("{}", course_table(store.course_statistics()?));
    Ok(())
}
