//! Gradebook configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::{StoreLimits, MAX_COURSES, MAX_NAME_LEN, MAX_STUDENTS};

/// Environment variable overriding [`GradebookConfig::data_file`].
pub const DATA_FILE_ENV: &str = "GRADEBOOK_DATA_FILE";

/// Top-level gradebook configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Data file used when a command is not given one explicitly.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Maximum number of students per store.
    #[serde(default = "default_max_students")]
    pub max_students: usize,
    /// Maximum number of courses per student.
    #[serde(default = "default_max_courses")]
    pub max_courses: usize,
    /// Maximum name length in characters.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("roster.txt")
}
fn default_max_students() -> usize {
    MAX_STUDENTS
}
fn default_max_courses() -> usize {
    MAX_COURSES
}
fn default_max_name_len() -> usize {
    MAX_NAME_LEN
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            max_students: default_max_students(),
            max_courses: default_max_courses(),
            max_name_len: default_max_name_len(),
        }
    }
}

impl GradebookConfig {
    /// Store limits described by this configuration.
    pub fn limits(&self) -> StoreLimits {
        StoreLimits {
            max_students: self.max_students,
            max_courses: self.max_courses,
            max_name_len: self.max_name_len,
        }
    }

    /// Reject limits that would make every store unusable.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_students", self.max_students),
            ("max_courses", self.max_courses),
            ("max_name_len", self.max_name_len),
        ] {
            if value == 0 {
                anyhow::bail!("{name} must be at least 1");
            }
        }
        if self.data_file.as_os_str().is_empty() {
            anyhow::bail!("data_file cannot be empty");
        }
        Ok(())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// Environment variable override: `GRADEBOOK_DATA_FILE`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebook.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "reading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GradebookConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradebookConfig::default(),
    };

    if let Ok(data_file) = std::env::var(DATA_FILE_ENV) {
        if !data_file.is_empty() {
            config.data_file = PathBuf::from(data_file);
        }
    }

    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}
