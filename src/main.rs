//! Command-line entry point: load the mapping, rewrite the document, report the output file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use drive_relink::config::{PathOverrides, resolve_run_paths};
use drive_relink::{load_mapping, replace_with_hosted_links};

#[derive(Parser, Debug)]
#[command(
  name = "drive-relink",
  about = "Replace local image paths in an HTML file with hosted links"
)]
struct Args {
  /// Tab-separated `filename<TAB>url` mapping file [default: mapping.txt]
  #[arg(long)]
  mapping: Option<PathBuf>,

  /// HTML document to rewrite [default: index.html]
  #[arg(long)]
  input: Option<PathBuf>,

  /// Where the rewritten document is written [default: index_drive.html]
  #[arg(long)]
  output: Option<PathBuf>,

  /// Explicit configuration file instead of ./relink.config.json
  #[arg(long)]
  config: Option<PathBuf>,
}

fn main() -> Result<()> {
  env_logger::init();
  let args = Args::parse();

  let paths = resolve_run_paths(Path::new(""), args.config.as_deref(), PathOverrides {
    mapping: args.mapping,
    input: args.input,
    output: args.output,
  })
  .context("failed to resolve input and output files")?;

  let mapping = load_mapping(&paths.mapping).context("failed to load image mapping")?;
  replace_with_hosted_links(&paths.input, &paths.output, &mapping)
    .context("failed to replace image links")?;

  println!(
    "[done] replaced image paths in '{}' with hosted links",
    paths.output.display()
  );
  Ok(())
}
