//! Command dispatch for interactive front ends.
//!
//! A front end maps its menu entries or typed lines onto [`Command`] and
//! hands them to [`RecordStore::execute`]; it never touches the store's
//! internals directly.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::StoreError;
use crate::ordering::{SortKey, SortOrder};
use crate::store::RecordStore;

/// One engine operation requested by a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RecomputeScores,
    RecomputeStatistics,
    Sort { key: SortKey, order: SortOrder },
    FindById(i64),
    FindByName(String),
    Save(PathBuf),
    Load(PathBuf),
}

/// What a successfully executed [`Command`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Recomputed,
    Sorted,
    /// Index of the first match, if any.
    Found(Option<usize>),
    Saved { path: PathBuf, records: usize },
    Loaded { records: usize, courses: usize },
}

impl RecordStore {
    /// Run a single command against the store.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, StoreError> {
        tracing::debug!(?command, "executing command");
        match command {
            Command::RecomputeScores => {
                self.recompute_record_scores();
                Ok(Outcome::Recomputed)
            }
            Command::RecomputeStatistics => {
                self.recompute_course_statistics();
                Ok(Outcome::Recomputed)
            }
            Command::Sort { key, order } => {
                self.sort_by(key, order)?;
                Ok(Outcome::Sorted)
            }
            Command::FindById(id) => Ok(Outcome::Found(self.find_by_id(id))),
            Command::FindByName(name) => Ok(Outcome::Found(self.find_by_name(&name))),
            Command::Save(path) => {
                self.save(&path)?;
                Ok(Outcome::Saved {
                    path,
                    records: self.len(),
                })
            }
            Command::Load(path) => {
                self.load(&path)?;
                Ok(Outcome::Loaded {
                    records: self.len(),
                    courses: self.course_count(),
                })
            }
        }
    }
}

impl FromStr for Command {
    type Err = String;

    /// Parse a typed line such as `sort total desc` or `find id 1002`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["recompute"] | ["recompute", "scores"] => Ok(Command::RecomputeScores),
            ["recompute", "stats"] | ["recompute", "statistics"] => {
                Ok(Command::RecomputeStatistics)
            }
            ["sort", key] => Ok(Command::Sort {
                key: key.parse()?,
                order: SortOrder::default(),
            }),
            ["sort", key, order] => Ok(Command::Sort {
                key: key.parse()?,
                order: order.parse()?,
            }),
            ["find", "id", id] => id
                .parse()
                .map(Command::FindById)
                .map_err(|_| format!("not a student id: {id}")),
            ["find", "name", name] => Ok(Command::FindByName((*name).to_string())),
            ["save", path] => Ok(Command::Save(PathBuf::from(path))),
            ["load", path] => Ok(Command::Load(PathBuf::from(path))),
            [] => Err("empty command".to_string()),
            [verb, ..] => Err(format!("unrecognized command: {verb}")),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::RecomputeScores => write!(f, "recompute scores"),
            Command::RecomputeStatistics => write!(f, "recompute stats"),
            Command::Sort { key, order } => write!(f, "sort {key} {order}"),
            Command::FindById(id) => write!(f, "find id {id}"),
            Command::FindByName(name) => write!(f, "find name {name}"),
            Command::Save(path) => write!(f, "save {}", path.display()),
            Command::Load(path) => write!(f, "load {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordInput;

    fn sample() -> RecordStore {
        let mut store = RecordStore::new();
        store
            .bulk_load(
                2,
                &[
                    RecordInput::new(1001, "Alice", vec![95.0, 85.0]),
                    RecordInput::new(1002, "Bob", vec![60.0, 55.0]),
                ],
            )
            .unwrap();
        store
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            "sort total desc".parse::<Command>().unwrap(),
            Command::Sort {
                key: SortKey::Total,
                order: SortOrder::Descending
            }
        );
        assert_eq!(
            "sort name".parse::<Command>().unwrap(),
            Command::Sort {
                key: SortKey::Name,
                order: SortOrder::Ascending
            }
        );
        assert_eq!(
            "find id 1002".parse::<Command>().unwrap(),
            Command::FindById(1002)
        );
        assert_eq!(
            "  find   name  Bob ".parse::<Command>().unwrap(),
            Command::FindByName("Bob".into())
        );
        assert_eq!(
            "recompute stats".parse::<Command>().unwrap(),
            Command::RecomputeStatistics
        );
        assert_eq!(
            "save out.txt".parse::<Command>().unwrap(),
            Command::Save(PathBuf::from("out.txt"))
        );
    }

    #[test]
    fn parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("sort age".parse::<Command>().is_err());
        assert!("find id abc".parse::<Command>().is_err());
        let err = "dance".parse::<Command>().unwrap_err();
        assert!(err.contains("dance"));
    }

    #[test]
    fn display_parses_back() {
        let commands = [
            Command::RecomputeScores,
            Command::Sort {
                key: SortKey::Id,
                order: SortOrder::Descending,
            },
            Command::FindByName("Alice".into()),
            Command::Load(PathBuf::from("roster.txt")),
        ];
        for command in commands {
            assert_eq!(command.to_string().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn execute_find_and_sort() {
        let mut store = sample();
        assert_eq!(
            store.execute(Command::FindById(1002)).unwrap(),
            Outcome::Found(Some(1))
        );
        assert_eq!(
            store.execute(Command::FindById(9999)).unwrap(),
            Outcome::Found(None)
        );

        store
            .execute(Command::Sort {
                key: SortKey::Total,
                order: SortOrder::Ascending,
            })
            .unwrap();
        assert_eq!(store.record(0).unwrap().name(), "Bob");
    }

    #[test]
    fn execute_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.txt");

        let mut store = sample();
        let saved = store.execute(Command::Save(path.clone())).unwrap();
        assert_eq!(
            saved,
            Outcome::Saved {
                path: path.clone(),
                records: 2
            }
        );

        let mut other = RecordStore::new();
        let loaded = other.execute(Command::Load(path)).unwrap();
        assert_eq!(
            loaded,
            Outcome::Loaded {
                records: 2,
                courses: 2
            }
        );
        assert!(other.course_statistics().is_err());
        other.execute(Command::RecomputeStatistics).unwrap();
        assert_eq!(other.course_statistics().unwrap().len(), 2);
    }
}
