//! The `gradebook recompute` command.

use anyhow::Result;

use super::Workspace;

pub fn execute(ws: &Workspace) -> Result<()> {
    let mut store = ws.load_store()?;
    store.recompute_record_scores();
    ws.save_store(&store)?;
    println!(
        "Recomputed totals and averages for {} students",
        store.len()
    );
    Ok(())
}
