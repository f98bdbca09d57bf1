//! The `gradebook list` command.

use anyhow::Result;

use super::{store_table, Workspace};

pub fn execute(ws: &Workspace) -> Result<()> {
    let store = ws.load_store()?;
    if store.is_empty() {
        println!("No students in {}.", ws.data_file.display());
        return Ok(());
    }
    println!("{}", store_table(&store));
    println!("{} students, {} courses", store.len(), store.course_count());
    Ok(())
}
