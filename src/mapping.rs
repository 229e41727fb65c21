//! Loader for the tab-separated `filename<TAB>url` mapping file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::RelinkError;

/// Lookup table from a bare filename to its hosted replacement URL.
pub type MappingTable = HashMap<String, String>;

/// Read the mapping file at `path` and build the lookup table.
///
/// The whole file must be readable as UTF-8; a missing or undecodable file aborts the run
/// instead of producing a partial table.
pub fn load_mapping(path: impl AsRef<Path>) -> Result<MappingTable, RelinkError> {
  let path = path.as_ref();
  let contents = fs::read_to_string(path).map_err(|err| RelinkError::MappingRead {
    path: path.to_path_buf(),
    source: err,
  })?;

  let mapping = parse_mapping(&contents);
  log::debug!(
    "loaded {} mapping entries from {}",
    mapping.len(),
    path.display()
  );
  Ok(mapping)
}

/// Build a lookup table from mapping file contents.
///
/// Each line is trimmed, blank lines are skipped, and a line only counts when splitting on
/// `\t` yields exactly two fields. A repeated filename keeps the URL from its last line.
pub fn parse_mapping(contents: &str) -> MappingTable {
  let mut mapping = MappingTable::new();
  let mut skipped = 0usize;

  for line in contents.lines() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }

    let mut fields = line.split('\t');
    match (fields.next(), fields.next(), fields.next()) {
      (Some(filename), Some(url), None) => {
        mapping.insert(filename.to_string(), url.to_string());
      }
      _ => skipped += 1,
    }
  }

  if skipped > 0 {
    log::debug!("skipped {skipped} malformed mapping lines");
  }
  mapping
}
