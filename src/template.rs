// src/template.rs
use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::{debug, trace};
use regex::{Captures, Regex};

use crate::error::PageError;

/// Matches `__NAME__` style placeholders left in a template.
static PLACEHOLDER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"__[A-Z][A-Z0-9_]*__").expect("placeholder pattern is valid"));

/// Placeholder -> final value. Ordered so the output never depends on hash seeds.
pub type Substitutions = BTreeMap<&'static str, String>;

/// Replaces every known placeholder with its value in a single pass.
/// Values are inserted verbatim and never rescanned; unknown placeholders are left in place.
pub fn substitute_content(content: &str, substitutions: &Substitutions) -> String {
  PLACEHOLDER_RE
    .replace_all(content, |caps: &Captures<'_>| match substitutions.get(&caps[0]) {
      Some(value) => {
        trace!("Replacing placeholder '{}'", &caps[0]);
        value.clone()
      }
      None => {
        debug!("No value for placeholder '{}'", &caps[0]);
        caps[0].to_string()
      }
    })
    .into_owned()
}

/// Substitutes and then fails if any `__NAME__` marker survived.
pub fn render_template(content: &str, substitutions: &Substitutions) -> Result<String, PageError> {
  let rendered = substitute_content(content, substitutions);
  let leftover = unresolved_placeholders(&rendered);
  if leftover.is_empty() {
    Ok(rendered)
  } else {
    Err(PageError::UnresolvedPlaceholders(leftover))
  }
}

/// Distinct placeholders still present in `content`, in order of first appearance.
pub fn unresolved_placeholders(content: &str) -> Vec<String> {
  let mut found: Vec<String> = Vec::new();
  for m in PLACEHOLDER_RE.find_iter(content) {
    if !found.iter().any(|f| f == m.as_str()) {
      found.push(m.as_str().to_string());
    }
  }
  found
}

/// Escapes text for use inside an element body.
pub fn escape_text(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for c in raw.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      _ => out.push(c),
    }
  }
  out
}

/// Escapes text for use inside a double- or single-quoted attribute value.
pub fn escape_attr(raw: &str) -> String {
  escape_text(raw)
    .replace('"', "&quot;")
    .replace('\'', "&#x27;")
}

/// Encodes `raw` as a JavaScript string literal that is safe inside a `<script>` element.
pub fn js_string_literal(raw: &str) -> Result<String, PageError> {
  // JSON strings are valid JS literals; `</` must not appear or it could close the element.
  Ok(serde_json::to_string(raw)?.replace("</", "<\\/"))
}
