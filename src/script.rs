// src/script.rs
//! The page's client-side behavior: one click listener that raises one alert.
//!
//! [`ClickBinding`] renders the inline `<script>` for the page and can also be
//! applied to a parsed document, which is how the rest of the crate exercises
//! the listener without a browser.
use std::sync::LazyLock;

use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};

use crate::error::{PageError, ScriptError};
use crate::template::js_string_literal;

static ANY_ID: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("[id]").expect("id selector is valid"));

/// Receives the alerts raised by a click handler.
pub trait AlertSink {
  fn alert(&mut self, message: &str);
}

/// Collects alerts in order, standing in for the browser's modal dialog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordedAlerts(pub Vec<String>);

impl AlertSink for RecordedAlerts {
  fn alert(&mut self, message: &str) {
    self.0.push(message.to_string());
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickBinding {
  target_id: String,
  message: String,
}

impl ClickBinding {
  pub fn new(target_id: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      target_id: target_id.into(),
      message: message.into(),
    }
  }

  pub fn target_id(&self) -> &str {
    &self.target_id
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  /// JavaScript registered once the document has loaded. A missing target returns early.
  pub fn to_script(&self) -> Result<String, PageError> {
    let id = js_string_literal(&self.target_id)?;
    let message = js_string_literal(&self.message)?;
    Ok(format!(
      "        document.addEventListener('DOMContentLoaded', function () {{
            var target = document.getElementById({id});
            if (!target) {{
                return;
            }}
            target.addEventListener('click', function () {{
                alert({message});
            }});
        }});"
    ))
  }

  /// Registers the listener on the first element carrying the target id.
  pub fn bind(&self, document: &Html) -> Result<BoundListener, ScriptError> {
    match elements_with_id(document, &self.target_id).into_iter().next() {
      Some(element) => {
        debug!(
          "Bound click listener to <{} id=\"{}\">",
          element.value().name(),
          self.target_id
        );
        Ok(BoundListener {
          message: self.message.clone(),
        })
      }
      None => Err(ScriptError::TargetAbsent {
        id: self.target_id.clone(),
      }),
    }
  }

  /// Runs the binding the way the page script does: an absent target is a silent no-op.
  pub fn run(&self, document: &Html) -> Option<BoundListener> {
    match self.bind(document) {
      Ok(listener) => Some(listener),
      Err(e) => {
        warn!("{}; click listener not registered.", e);
        None
      }
    }
  }
}

/// A registered click listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundListener {
  message: String,
}

impl BoundListener {
  /// Dispatches one click. The handler runs to completion and raises exactly one alert.
  pub fn click(&self, sink: &mut impl AlertSink) {
    sink.alert(&self.message);
  }
}

/// All elements whose `id` attribute equals `id`, in document order.
pub fn elements_with_id<'a>(document: &'a Html, id: &str) -> Vec<ElementRef<'a>> {
  document
    .select(&ANY_ID)
    .filter(|el| el.value().id() == Some(id))
    .collect()
}
