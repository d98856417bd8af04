//! Configuration: where the registry keeps its files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `data_dir`.
pub const DATA_DIR_ENV: &str = "ROSTER_DATA_DIR";

/// Top-level roster configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Directory holding the data files and the chart.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_students_file")]
    pub students_file: PathBuf,
    #[serde(default = "default_teachers_file")]
    pub teachers_file: PathBuf,
    #[serde(default = "default_scores_file")]
    pub scores_file: PathBuf,
    /// Histogram image, overwritten on every statistics run.
    #[serde(default = "default_chart_file")]
    pub chart_file: PathBuf,
    /// Fixed seed for the quiz shuffle (unset = random order).
    #[serde(default)]
    pub quiz_seed: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_students_file() -> PathBuf {
    PathBuf::from("alunos.json")
}
fn default_teachers_file() -> PathBuf {
    PathBuf::from("professores.json")
}
fn default_scores_file() -> PathBuf {
    PathBuf::from("notas.json")
}
fn default_chart_file() -> PathBuf {
    PathBuf::from("grafico_notas.svg")
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            students_file: default_students_file(),
            teachers_file: default_teachers_file(),
            scores_file: default_scores_file(),
            chart_file: default_chart_file(),
            quiz_seed: None,
        }
    }
}

impl RosterConfig {
    /// Config rooted at `data_dir` with every other setting defaulted.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Resolved locations of the three data files.
    pub fn store_paths(&self) -> StorePaths {
        StorePaths {
            students: self.data_dir.join(&self.students_file),
            teachers: self.data_dir.join(&self.teachers_file),
            scores: self.data_dir.join(&self.scores_file),
        }
    }

    /// Resolved location of the histogram image.
    pub fn chart_path(&self) -> PathBuf {
        self.data_dir.join(&self.chart_file)
    }
}

/// The three files the registry store reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub students: PathBuf,
    pub teachers: PathBuf,
    pub scores: PathBuf,
}

impl StorePaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        RosterConfig::in_dir(dir).store_paths()
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `roster.toml` in the current directory
/// 2. `~/.config/roster/config.toml`
///
/// A missing explicit path is an error. `ROSTER_DATA_DIR` overrides
/// `data_dir` from any source.
pub fn load_config_from(path: Option<&Path>) -> Result<RosterConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("roster.toml");
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
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<RosterConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => RosterConfig::default(),
    };

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            config.data_dir = PathBuf::from(dir);
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("roster"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RosterConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.chart_file, PathBuf::from("grafico_notas.svg"));
        assert!(config.quiz_seed.is_none());
    }

    #[test]
    fn store_paths_resolve_against_data_dir() {
        let paths = RosterConfig::in_dir("/tmp/school").store_paths();
        assert_eq!(paths.students, PathBuf::from("/tmp/school/alunos.json"));
        assert_eq!(paths.teachers, PathBuf::from("/tmp/school/professores.json"));
        assert_eq!(paths.scores, PathBuf::from("/tmp/school/notas.json"));
    }

    #[test]
    fn parse_partial_config() {
        let config: RosterConfig = toml::from_str(
            r#"
data_dir = "/var/lib/roster"
quiz_seed = 7
"#,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/roster"));
        assert_eq!(config.quiz_seed, Some(7));
        assert_eq!(config.scores_file, PathBuf::from("notas.json"));
        assert_eq!(
            config.chart_path(),
            PathBuf::from("/var/lib/roster/grafico_notas.svg")
        );
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(&path, "chart_file = \"chart.svg\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.chart_file, PathBuf::from("chart.svg"));
    }
}
