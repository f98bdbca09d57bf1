//! The `gradebook find` command.

use anyhow::Result;

use super::{roster_table, Workspace};

pub fn execute(ws: &Workspace, id: Option<i64>, name: Option<String>) -> Result<()> {
    let store = ws.load_store()?;

    let (found, what) = match (id, name) {
        (Some(id), _) => (store.find_by_id(id), format!("id {id}")),
        (None, Some(name)) => {
            let found = store.find_by_name(&name);
            (found, format!("name '{name}'"))
        }
        (None, None) => anyhow::bail!("either --id or --name is required"),
    };

    match found {
        Some(index) => {
            let record = store.record(index)?;
            println!("{}", roster_table([(index, record)], store.course_count()));
            Ok(())
        }
        None => {
            println!("No student with {what}");
            std::process::exit(1);
        }
    }
}
