// src/page.rs
use log::{debug, info, warn};

use crate::error::PageError;
use crate::script::ClickBinding;
use crate::template::{self, escape_attr, escape_text, Substitutions};

pub const PAGE_TITLE: &str = "Squire's Page";
pub const SQUIRE_INTRO: &str =
  "Welcome to the world of squires, where bravery and chivalry are the order of the day.";
pub const SQUIRE_FACT: &str =
  "Squires are young noblemen serving as an attendant to a knight before becoming a knight themselves.";
pub const BUTTON_ID: &str = "myButton";
pub const BUTTON_LABEL: &str = "Learn More";
pub const ALERT_MESSAGE: &str =
  "Squires were essential in medieval times, assisting knights and learning the art of combat.";

const PAGE_TEMPLATE: &str = include_str!("../templates/squire_page.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
  Stylesheet,
  Script,
}

impl AssetKind {
  pub fn as_str(self) -> &'static str {
    match self {
      AssetKind::Stylesheet => "stylesheet",
      AssetKind::Script => "script",
    }
  }
}

/// An external resource referenced by fixed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
  pub name: &'static str,
  pub kind: AssetKind,
  pub url: &'static str,
}

impl Asset {
  fn to_tag(self) -> String {
    match self.kind {
      AssetKind::Stylesheet => format!(
        "    <link href=\"{}\" rel=\"stylesheet\">",
        escape_attr(self.url)
      ),
      AssetKind::Script => format!("    <script src=\"{}\"></script>", escape_attr(self.url)),
    }
  }
}

/// Referenced assets, in document order.
pub const ASSETS: [Asset; 4] = [
  Asset {
    name: "Bootstrap CSS",
    kind: AssetKind::Stylesheet,
    url: "https://stackpath.bootstrapcdn.com/bootstrap/4.5.2/css/bootstrap.min.css",
  },
  Asset {
    name: "jQuery (slim)",
    kind: AssetKind::Script,
    url: "https://code.jquery.com/jquery-3.5.1.slim.min.js",
  },
  Asset {
    name: "Popper",
    kind: AssetKind::Script,
    url: "https://cdn.jsdelivr.net/npm/@popperjs/core@2.5.4/dist/umd/popper.min.js",
  },
  Asset {
    name: "Bootstrap JS",
    kind: AssetKind::Script,
    url: "https://stackpath.bootstrapcdn.com/bootstrap/4.5.2/js/bootstrap.min.js",
  },
];

/// The page's only interactive behavior.
pub fn click_binding() -> ClickBinding {
  ClickBinding::new(BUTTON_ID, ALERT_MESSAGE)
}

fn asset_tags(kind: AssetKind) -> String {
  ASSETS
    .iter()
    .filter(|a| a.kind == kind)
    .map(|a| a.to_tag())
    .collect::<Vec<_>>()
    .join("\n")
}

/// Placeholder values for the page template, keyed by placeholder.
fn page_substitutions() -> Result<Substitutions, PageError> {
  let mut subs = Substitutions::new();
  subs.insert("__PAGE_TITLE__", escape_text(PAGE_TITLE));
  subs.insert("__SQUIRE_INTRO__", escape_text(SQUIRE_INTRO));
  // Server-side echo of the fact sentence.
  subs.insert("__SQUIRE_FACT__", escape_text(SQUIRE_FACT));
  subs.insert("__BUTTON_ID__", escape_attr(BUTTON_ID));
  subs.insert("__BUTTON_LABEL__", escape_text(BUTTON_LABEL));
  subs.insert("__STYLESHEETS__", asset_tags(AssetKind::Stylesheet));
  subs.insert("__SCRIPTS__", asset_tags(AssetKind::Script));
  subs.insert("__CLICK_SCRIPT__", click_binding().to_script()?);
  Ok(subs)
}

/// Produces the complete HTML document. Output is identical on every call.
pub fn render_page() -> Result<String, PageError> {
  let subs = page_substitutions()?;
  debug!("Rendering page with {} substitutions", subs.len());
  let html = template::render_template(PAGE_TEMPLATE, &subs)?;
  debug!("Rendered page: {} bytes", html.len());
  Ok(html)
}

/// Renders the page to stdout or to a file.
pub fn run_render(output: Option<&std::path::Path>) -> Result<(), PageError> {
  let html = render_page()?;
  match output {
    None => {
      use std::io::Write;
      let mut stdout = std::io::stdout().lock();
      stdout.write_all(html.as_bytes())?;
      stdout.flush()?;
    }
    Some(path) => {
      if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
          std::fs::create_dir_all(parent).map_err(|e| PageError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
          })?;
          debug!("Created output directory: {}", parent.display());
        }
      }
      if path.exists() {
        warn!("Output file '{}' already exists. It will be overwritten.", path.display());
      }
      std::fs::write(path, &html).map_err(|e| PageError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
      })?;
      info!("Wrote page to '{}'", path.display());
    }
  }
  Ok(())
}
