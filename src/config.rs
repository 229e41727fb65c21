//! Run configuration loader describing which files a relink run reads and writes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File name probed in the working directory by [`RelinkConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "relink.config.json";

/// Discoverable configuration naming the mapping, input and output files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RelinkConfig {
  /// Tab-separated `filename<TAB>url` mapping file.
  pub mapping_file: String,
  /// HTML document whose image references are rewritten.
  pub input_html: String,
  /// Destination of the rewritten document.
  pub output_html: String,
}

impl Default for RelinkConfig {
  fn default() -> Self {
    Self {
      mapping_file: "mapping.txt".into(),
      input_html: "index.html".into(),
      output_html: "index_drive.html".into(),
    }
  }
}

impl RelinkConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// When the configuration file does not exist or fails to parse we fall back to the
  /// default file names.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    Self::from_path(&candidate).unwrap_or_default()
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)
      .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
      .with_context(|| format!("failed to parse configuration JSON in {}", path.display()))
  }

  /// Mapping file resolved against `dir`.
  pub fn mapping_path(&self, dir: &Path) -> PathBuf {
    dir.join(&self.mapping_file)
  }

  /// Input document resolved against `dir`.
  pub fn input_path(&self, dir: &Path) -> PathBuf {
    dir.join(&self.input_html)
  }

  /// Output document resolved against `dir`.
  pub fn output_path(&self, dir: &Path) -> PathBuf {
    dir.join(&self.output_html)
  }
}

/// Paths given explicitly on the command line; each one wins over any configuration.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
  /// Replacement for the configured mapping file.
  pub mapping: Option<PathBuf>,
  /// Replacement for the configured input document.
  pub input: Option<PathBuf>,
  /// Replacement for the configured output document.
  pub output: Option<PathBuf>,
}

/// Fully resolved files for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
  /// Mapping file to load.
  pub mapping: PathBuf,
  /// HTML document to rewrite.
  pub input: PathBuf,
  /// Destination of the rewritten document.
  pub output: PathBuf,
}

/// Resolve the files for a run: override, then configuration, then built-in default.
///
/// With `config_file` the configuration must load, and its names are relative to that file's
/// directory. Without it, `working_dir` is searched for [`DEFAULT_CONFIG_FILE`] and names are
/// relative to `working_dir`.
pub fn resolve_run_paths(
  working_dir: &Path,
  config_file: Option<&Path>,
  overrides: PathOverrides,
) -> Result<RunPaths> {
  let (config, base) = match config_file {
    Some(path) => {
      let config = RelinkConfig::from_path(path)?;
      let base = path.parent().unwrap_or(Path::new("")).to_path_buf();
      (config, base)
    }
    None => (RelinkConfig::discover(working_dir), working_dir.to_path_buf()),
  };

  Ok(RunPaths {
    mapping: overrides
      .mapping
      .unwrap_or_else(|| config.mapping_path(&base)),
    input: overrides.input.unwrap_or_else(|| config.input_path(&base)),
    output: overrides.output.unwrap_or_else(|| config.output_path(&base)),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn discover_defaults_without_config_file() {
    let temp = tempdir().unwrap();
    let config = RelinkConfig::discover(temp.path());

    assert_eq!(config, RelinkConfig::default());
    assert_eq!(config.output_path(temp.path()), temp.path().join("index_drive.html"));
  }

  #[test]
  fn discover_merges_partial_config_with_defaults() {
    let temp = tempdir().unwrap();
    fs::write(
      temp.path().join(DEFAULT_CONFIG_FILE),
      r#"{"input_html": "site/home.html"}"#,
    )
    .unwrap();

    let config = RelinkConfig::discover(temp.path());
    assert_eq!(config.input_html, "site/home.html");
    assert_eq!(config.mapping_file, "mapping.txt");
    assert_eq!(config.output_html, "index_drive.html");
  }

  #[test]
  fn discover_ignores_unparsable_config() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();

    assert_eq!(RelinkConfig::discover(temp.path()), RelinkConfig::default());
  }

  #[test]
  fn from_path_reports_parse_cause() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, r#"{"input_html": 3}"#).unwrap();

    let err = RelinkConfig::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
    assert!(err.downcast_ref::<serde_json::Error>().is_some());
  }

  #[test]
  fn from_path_reports_missing_file() {
    let temp = tempdir().unwrap();
    let err = RelinkConfig::from_path(&temp.path().join("absent.json")).unwrap_err();
    assert!(err.downcast_ref::<std::io::Error>().is_some());
  }

  #[test]
  fn resolves_defaults_against_working_dir() {
    let temp = tempdir().unwrap();
    let paths = resolve_run_paths(temp.path(), None, PathOverrides::default()).unwrap();

    assert_eq!(paths, RunPaths {
      mapping: temp.path().join("mapping.txt"),
      input: temp.path().join("index.html"),
      output: temp.path().join("index_drive.html"),
    });
  }

  #[test]
  fn overrides_win_over_discovered_config() {
    let temp = tempdir().unwrap();
    fs::write(
      temp.path().join(DEFAULT_CONFIG_FILE),
      r#"{"mapping_file": "links.tsv", "input_html": "site.html"}"#,
    )
    .unwrap();

    let paths = resolve_run_paths(temp.path(), None, PathOverrides {
      input: Some(PathBuf::from("cli.html")),
      ..PathOverrides::default()
    })
    .unwrap();

    assert_eq!(paths.mapping, temp.path().join("links.tsv"));
    assert_eq!(paths.input, PathBuf::from("cli.html"));
    assert_eq!(paths.output, temp.path().join("index_drive.html"));
  }

  #[test]
  fn explicit_config_names_resolve_next_to_the_file() {
    let temp = tempdir().unwrap();
    let config_dir = temp.path().join("conf");
    fs::create_dir_all(&config_dir).unwrap();
    let config_file = config_dir.join("relink.json");
    fs::write(
      &config_file,
      r#"{"mapping_file": "links.tsv", "output_html": "out/drive.html"}"#,
    )
    .unwrap();

    let paths = resolve_run_paths(
      temp.path(),
      Some(&config_file),
      PathOverrides::default(),
    )
    .unwrap();

    assert_eq!(paths.mapping, config_dir.join("links.tsv"));
    assert_eq!(paths.input, config_dir.join("index.html"));
    assert_eq!(paths.output, config_dir.join("out/drive.html"));
  }

  #[test]
  fn explicit_config_must_load() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("relink.json");
    fs::write(&config_file, "{ not json").unwrap();

    let err = resolve_run_paths(temp.path(), Some(&config_file), PathOverrides::default())
      .unwrap_err();
    assert!(err.downcast_ref::<serde_json::Error>().is_some());
  }
}
