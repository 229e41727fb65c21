//! HTML rewriting that swaps local image references for hosted links.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use lol_html::{RewriteStrSettings, element, rewrite_str};

use crate::error::RelinkError;
use crate::filename::lookup_hosted;
use crate::mapping::MappingTable;
use crate::styles::{rewrite_style, unescape_style};

/// Counts of the references touched while rewriting a document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteSummary {
  /// `img[src]` values replaced with a hosted link.
  pub images_rewritten: usize,
  /// `img[src]` values whose filename had no mapping entry.
  pub images_unmatched: usize,
  /// `background-image` URLs replaced inside `style` attributes.
  pub backgrounds_rewritten: usize,
}

/// Rewrite `img[src]` values and inline `background-image` URLs found in `mapping`.
///
/// Markup outside the rewritten attribute values passes through unchanged. A `style`
/// attribute is only re-emitted when at least one of its URLs was substituted.
pub fn rewrite_html(
  html: &str,
  mapping: &MappingTable,
) -> Result<(String, RewriteSummary), RelinkError> {
  let summary = RefCell::new(RewriteSummary::default());

  let output = rewrite_str(html, RewriteStrSettings {
    element_content_handlers: vec![
      element!("img[src]", |el| {
        let Some(raw) = el.get_attribute("src") else {
          return Ok(());
        };
        let src = html_escape::decode_html_entities(&raw);

        match lookup_hosted(mapping, &src) {
          Some(hosted) => {
            el.set_attribute("src", &html_escape::encode_double_quoted_attribute(hosted))?;
            summary.borrow_mut().images_rewritten += 1;
          }
          None => {
            log::debug!("no mapping entry for image {src}");
            summary.borrow_mut().images_unmatched += 1;
          }
        }
        Ok(())
      }),
      element!("[style]", |el| {
        let Some(raw) = el.get_attribute("style") else {
          return Ok(());
        };

        // Decoded once as an attribute value, then once more as style text.
        let value = html_escape::decode_html_entities(&raw);
        let (rewritten, replaced) = rewrite_style(&unescape_style(&value), mapping);
        if replaced > 0 {
          el.set_attribute(
            "style",
            &html_escape::encode_double_quoted_attribute(&rewritten),
          )?;
          summary.borrow_mut().backgrounds_rewritten += replaced;
        }
        Ok(())
      }),
    ],
    // Tolerate ambiguous markup instead of failing the run.
    strict: false,
    ..RewriteStrSettings::new()
  })
  .map_err(|source| RelinkError::Rewrite { source })?;

  Ok((output, summary.into_inner()))
}

/// Rewrite the document at `input` and write the result to `output`.
///
/// Any existing file at `output` is replaced. Nothing is written when reading or rewriting
/// the input fails.
pub fn replace_with_hosted_links(
  input: impl AsRef<Path>,
  output: impl AsRef<Path>,
  mapping: &MappingTable,
) -> Result<RewriteSummary, RelinkError> {
  let input = input.as_ref();
  let output = output.as_ref();

  let html = fs::read_to_string(input).map_err(|err| RelinkError::HtmlRead {
    path: input.to_path_buf(),
    source: err,
  })?;

  let (rewritten, summary) = rewrite_html(&html, mapping)?;

  fs::write(output, rewritten).map_err(|err| RelinkError::OutputWrite {
    path: output.to_path_buf(),
    source: err,
  })?;

  log::info!(
    "rewrote {} image sources and {} background images ({} images unmatched) into {}",
    summary.images_rewritten,
    summary.backgrounds_rewritten,
    summary.images_unmatched,
    output.display()
  );
  Ok(summary)
}
