//! Fatal error taxonomy for a relink run.

use std::path::PathBuf;

/// Errors that abort a relink run.
#[derive(Debug)]
pub enum RelinkError {
  /// The mapping file could not be read.
  MappingRead {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// The input HTML document could not be read.
  HtmlRead {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// The HTML rewriter rejected the document or a handler failed.
  Rewrite {
    /// Source rewriting error.
    source: lol_html::errors::RewritingError,
  },
  /// The rewritten document could not be written.
  OutputWrite {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
}

impl std::fmt::Display for RelinkError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MappingRead { path, source } => {
        write!(f, "failed to read mapping file {}: {}", path.display(), source)
      }
      Self::HtmlRead { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Rewrite { source } => write!(f, "failed to rewrite HTML: {}", source),
      Self::OutputWrite { path, source } => {
        write!(f, "failed to write {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for RelinkError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::MappingRead { source, .. } => Some(source),
      Self::HtmlRead { source, .. } => Some(source),
      Self::Rewrite { source } => Some(source),
      Self::OutputWrite { source, .. } => Some(source),
    }
  }
}
