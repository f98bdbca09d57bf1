//! The `gradebook shell` command.
//!
//! Reads one command per line from stdin until `quit` or end of input.
//! Engine operations go through [`Command`]; the shell adds data entry
//! and display commands on top.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use gradebook_core::{Command, Outcome, RecordStore};

use super::{course_table, grade_table, roster_table, store_table, Workspace};

const HELP: &str = "\
Commands:
  init <students> <courses>        reset to blank records
  set <index> <id> <name> <score>...  overwrite a record
  add <id> <name> <score>...       append a record
  list                             print the roster
  status                           dataset version and freshness
  recompute [scores|stats]         recompute totals or course statistics
  stats                            print course totals and averages
  grades                           print the grade distribution
  sort <total|id|name> [asc|desc]  reorder the roster
  find id <id> | find name <name>  locate a student
  save [path] | load [path]        write or read the roster file
  help                             show this message
  quit                             leave the shell";

/// A line typed at the prompt.
#[derive(Debug, PartialEq)]
enum Line {
    Engine(Command),
    Init { students: usize, courses: usize },
    Set { index: usize, id: i64, name: String, scores: Vec<f64> },
    Add { id: i64, name: String, scores: Vec<f64> },
    List,
    Status,
    Stats,
    Grades,
    Help,
    Quit,
    Blank,
}

fn parse_line(line: &str, data_file: &Path) -> Result<Line> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let line = match words.as_slice() {
        [] => Line::Blank,
        ["help"] | ["?"] => Line::Help,
        ["quit"] | ["exit"] | ["q"] => Line::Quit,
        ["list"] => Line::List,
        ["status"] => Line::Status,
        ["stats"] => Line::Stats,
        ["grades"] => Line::Grades,
        ["save"] => Line::Engine(Command::Save(data_file.to_path_buf())),
        ["load"] => Line::Engine(Command::Load(data_file.to_path_buf())),
        ["init", students, courses] => Line::Init {
            students: students.parse().context("invalid student count")?,
            courses: courses.parse().context("invalid course count")?,
        },
        ["set", index, id, name, scores @ ..] => Line::Set {
            index: index.parse().context("invalid index")?,
            id: id.parse().context("invalid student id")?,
            name: (*name).to_string(),
            scores: parse_scores(scores)?,
        },
        ["add", id, name, scores @ ..] => Line::Add {
            id: id.parse().context("invalid student id")?,
            name: (*name).to_string(),
            scores: parse_scores(scores)?,
        },
        _ => Line::Engine(line.parse::<Command>().map_err(anyhow::Error::msg)?),
    };
    Ok(line)
}

fn parse_scores(words: &[&str]) -> Result<Vec<f64>> {
    words
        .iter()
        .map(|w| w.parse::<f64>().with_context(|| format!("invalid score '{w}'")))
        .collect()
}

pub fn execute(ws: &Workspace) -> Result<()> {
    let mut store = if ws.data_file.exists() {
        ws.load_store()?
    } else {
        ws.empty_store()
    };

    println!(
        "gradebook shell: {} students loaded from {}. Type 'help' for commands.",
        store.len(),
        ws.data_file.display()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("failed to read stdin")?;

        match parse_line(&line, &ws.data_file).and_then(|l| run_line(&mut store, l)) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("error: {e:#}"),
        }
    }
    Ok(())
}

/// Run one parsed line. Returns `false` when the shell should exit.
fn run_line(store: &mut RecordStore, line: Line) -> Result<bool> {
    match line {
        Line::Blank => {}
        Line::Quit => return Ok(false),
        Line::Help => println!("{HELP}"),
        Line::List => {
            if store.is_empty() {
                println!("(empty)");
            } else {
                println!("{}", store_table(store));
            }
        }
        Line::Status => println!("{}", status_line(store)),
        Line::Stats => println!("{}", course_table(store.course_statistics()?)),
        Line::Grades => println!("{}", grade_table(store.course_statistics()?)),
        Line::Init { students, courses } => {
            store.initialize(students, courses)?;
            println!("Initialized {students} blank records with {courses} courses");
        }
        Line::Set {
            index,
            id,
            name,
            scores,
        } => {
            store.set_record(index, id, &name, &scores)?;
            println!("Record {index} updated");
        }
        Line::Add { id, name, scores } => {
            let index = store.add_record(id, &name, &scores)?;
            println!("Record {index} added");
        }
        Line::Engine(command) => {
            let outcome = store.execute(command)?;
            report_outcome(store, outcome);
        }
    }
    Ok(true)
}

fn status_line(store: &RecordStore) -> String {
    let state = |fresh: bool| if fresh { "fresh" } else { "stale" };
    format!(
        "version {}: {} students, {} courses, totals {}, statistics {}",
        store.version(),
        store.len(),
        store.course_count(),
        state(store.scores_fresh()),
        state(store.statistics_fresh())
    )
}

fn report_outcome(store: &RecordStore, outcome: Outcome) {
    match outcome {
        Outcome::Recomputed => println!("Done"),
        Outcome::Sorted => println!("{}", store_table(store)),
        Outcome::Found(Some(index)) => {
            if let Ok(record) = store.record(index) {
                println!("{}", roster_table([(index, record)], store.course_count()));
            }
        }
        Outcome::Found(None) => println!("Not found"),
        Outcome::Saved { path, records } => {
            println!("Saved {records} records to {}", path.display())
        }
        Outcome::Loaded { records, courses } => {
            println!("Loaded {records} records with {courses} courses")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::{SortKey, SortOrder};
    use std::path::PathBuf;

    fn data_file() -> PathBuf {
        PathBuf::from("roster.txt")
    }

    #[test]
    fn parses_shell_only_commands() {
        assert_eq!(parse_line("  ", &data_file()).unwrap(), Line::Blank);
        assert_eq!(parse_line("quit", &data_file()).unwrap(), Line::Quit);
        assert_eq!(
            parse_line("init 3 2", &data_file()).unwrap(),
            Line::Init {
                students: 3,
                courses: 2
            }
        );
        assert_eq!(
            parse_line("add 7 Eve 90 80.5", &data_file()).unwrap(),
            Line::Add {
                id: 7,
                name: "Eve".into(),
                scores: vec![90.0, 80.5]
            }
        );
    }

    #[test]
    fn bare_save_uses_data_file() {
        assert_eq!(
            parse_line("save", &data_file()).unwrap(),
            Line::Engine(Command::Save(data_file()))
        );
    }

    #[test]
    fn falls_through_to_engine_commands() {
        assert_eq!(
            parse_line("sort total desc", &data_file()).unwrap(),
            Line::Engine(Command::Sort {
                key: SortKey::Total,
                order: SortOrder::Descending
            })
        );
        assert!(parse_line("dance", &data_file()).is_err());
        assert!(parse_line("add 7 Eve ninety", &data_file()).is_err());
    }

    #[test]
    fn status_tracks_version_and_freshness() {
        let mut store = RecordStore::new();
        assert_eq!(parse_line("status", &data_file()).unwrap(), Line::Status);

        run_line(&mut store, Line::Init { students: 1, courses: 1 }).unwrap();
        assert_eq!(
            status_line(&store),
            "version 1: 1 students, 1 courses, totals stale, statistics stale"
        );

        run_line(&mut store, Line::Engine(Command::RecomputeScores)).unwrap();
        run_line(&mut store, Line::Engine(Command::RecomputeStatistics)).unwrap();
        assert_eq!(
            status_line(&store),
            "version 1: 1 students, 1 courses, totals fresh, statistics fresh"
        );
    }

    #[test]
    fn session_reports_stale_statistics() {
        let mut store = RecordStore::new();
        run_line(&mut store, Line::Init { students: 1, courses: 2 }).unwrap();
        run_line(
            &mut store,
            Line::Set {
                index: 0,
                id: 1,
                name: "Ann".into(),
                scores: vec![90.0, 70.0],
            },
        )
        .unwrap();

        let err = run_line(&mut store, Line::Stats).unwrap_err();
        assert!(err.to_string().contains("stale"));

        run_line(&mut store, Line::Engine(Command::RecomputeStatistics)).unwrap();
        assert!(run_line(&mut store, Line::Stats).unwrap());
        assert!(!run_line(&mut store, Line::Quit).unwrap());
    }
}
