//! Filename extraction from image URLs.

use std::sync::OnceLock;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::mapping::MappingTable;

fn placeholder_base() -> &'static Url {
  static BASE: OnceLock<Url> = OnceLock::new();
  BASE.get_or_init(|| Url::parse("relink://document/").expect("invalid placeholder base URL"))
}

/// Final path segment of `value` exactly as the URL parser serialises it (percent-encoded).
fn last_segment(value: &str) -> Option<String> {
  let parsed = placeholder_base().join(value).ok()?;
  let segment = parsed.path_segments()?.next_back()?;
  if segment.is_empty() {
    return None;
  }

  Some(segment.to_string())
}

/// Return the final path segment of `value`, ignoring any query string or fragment.
///
/// Relative references are resolved against a placeholder base so `img/cat.png`,
/// `/img/cat.png` and `https://cdn.example/img/cat.png?v=2` all yield `cat.png`. The segment is
/// percent-decoded so it can be compared against the raw filenames of the mapping file.
pub fn url_filename(value: &str) -> Option<String> {
  let segment = last_segment(value)?;
  Some(percent_decode_str(&segment).decode_utf8_lossy().into_owned())
}

/// Find the hosted link for the filename referenced by `value`.
///
/// The segment is tried as written first, so keys stored percent-encoded (`my%20cat.png`)
/// match, then in decoded form (`my cat.png`).
pub fn lookup_hosted<'m>(mapping: &'m MappingTable, value: &str) -> Option<&'m String> {
  let segment = last_segment(value)?;
  if let Some(hosted) = mapping.get(&segment) {
    return Some(hosted);
  }

  let decoded = percent_decode_str(&segment).decode_utf8_lossy();
  mapping.get(decoded.as_ref())
}
