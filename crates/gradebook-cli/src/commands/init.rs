//! The `gradebook init` command.

use std::path::Path;

use anyhow::Result;

use gradebook_core::RecordInput;

use super::Workspace;

pub fn execute(ws: &Workspace) -> Result<()> {
    // Create gradebook.toml
    if Path::new("gradebook.toml").exists() {
        println!("gradebook.toml already exists, skipping.");
    } else {
        std::fs::write("gradebook.toml", SAMPLE_CONFIG)?;
        println!("Created gradebook.toml");
    }

    // Create sample roster
    if ws.data_file.exists() {
        println!("{} already exists, skipping.", ws.data_file.display());
    } else {
        let mut store = ws.empty_store();
        let entries: Vec<RecordInput> = SAMPLE_ROSTER
            .iter()
            .map(|&(id, name, scores)| RecordInput::new(id, name, scores.to_vec()))
            .collect();
        store.bulk_load(3, &entries)?;
        ws.save_store(&store)?;
        println!("Created {}", ws.data_file.display());
    }

    println!("\nNext steps:");
    println!("  1. Run: gradebook list");
    println!("  2. Run: gradebook grades");
    println!("  3. Run: gradebook report --format html --output report.html");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

data_file = "roster.txt"
max_students = 30
max_courses = 6
max_name_len = 20
"#;

const SAMPLE_ROSTER: &[(i64, &str, [f64; 3])] = &[
    (1001, "Alice", [95.0, 85.0, 78.0]),
    (1002, "Bob", [60.0, 55.0, 71.0]),
    (1003, "Carol", [88.0, 92.0, 64.0]),
    (1004, "Dan", [72.0, 81.0, 90.0]),
];
