#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod document;
pub mod error;
pub mod filename;
pub mod mapping;
pub mod styles;

pub use config::{PathOverrides, RelinkConfig, RunPaths, resolve_run_paths};
pub use document::{RewriteSummary, replace_with_hosted_links, rewrite_html};
pub use error::RelinkError;
pub use mapping::{MappingTable, load_mapping, parse_mapping};
