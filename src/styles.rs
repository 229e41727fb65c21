//! Inline `background-image: url(...)` rewriting for `style` attributes.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::filename::lookup_hosted;
use crate::mapping::MappingTable;

fn background_image_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r#"(background-image\s*:\s*url\(['"]?)([^)'"]+)(['"]?\))"#)
      .expect("invalid background-image regex")
  })
}

/// Decode HTML entities in a raw `style` attribute value.
pub fn unescape_style(raw: &str) -> Cow<'_, str> {
  html_escape::decode_html_entities(raw)
}

/// Replace every `background-image` URL whose filename appears in `mapping`.
///
/// Only the URL body is substituted; the `background-image:url(` prefix, optional quotes and
/// closing parenthesis are kept as written. Declarations without a mapping hit are left
/// untouched. Returns the rewritten text and the number of substituted URLs.
pub fn rewrite_style(style: &str, mapping: &MappingTable) -> (String, usize) {
  let mut replaced = 0usize;
  let rewritten = background_image_pattern().replace_all(style, |caps: &Captures<'_>| {
    let url = &caps[2];
    match lookup_hosted(mapping, url) {
      Some(hosted) => {
        replaced += 1;
        format!("{}{}{}", &caps[1], hosted, &caps[3])
      }
      None => {
        log::debug!("no mapping entry for background image {url}");
        caps[0].to_string()
      }
    }
  });

  (rewritten.into_owned(), replaced)
}
