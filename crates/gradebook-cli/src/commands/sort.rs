//! The `gradebook sort` command.

use anyhow::Result;

use gradebook_core::{SortKey, SortOrder};

use super::{store_table, Workspace};

pub fn execute(ws: &Workspace, key: SortKey, order: SortOrder, write: bool) -> Result<()> {
    let mut store = ws.load_store()?;
    store.sort_by(key, order)?;
    println!("{}", store_table(&store));

    if write {
        ws.save_store(&store)?;
        println!("Saved sorted roster to {}", ws.data_file.display());
    }
    Ok(())
}
