// src/check.rs
use std::path::Path;
use std::sync::LazyLock;

use log::{debug, error, info};
use scraper::{Html, Selector};
use serde::Serialize;

use crate::cli::CheckArgs;
use crate::error::PageError;
use crate::page::{self, ASSETS, PAGE_TITLE, SQUIRE_FACT};
use crate::script::{elements_with_id, RecordedAlerts};

static HEADINGS: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("h1").expect("heading selector is valid"));
static PARAGRAPHS: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("p").expect("paragraph selector is valid"));
static INLINE_SCRIPTS: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("script:not([src])").expect("script selector is valid"));

/// Outcome of one contract check.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
  pub name: &'static str,
  pub passed: bool,
  pub detail: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CheckReport {
  pub checks: Vec<CheckOutcome>,
}

impl CheckReport {
  pub fn is_ok(&self) -> bool {
    self.checks.iter().all(|c| c.passed)
  }

  pub fn failed(&self) -> usize {
    self.checks.iter().filter(|c| !c.passed).count()
  }
}

fn outcome(name: &'static str, passed: bool, detail: String) -> CheckOutcome {
  debug!("check '{}': passed={} ({})", name, passed, detail);
  CheckOutcome {
    name,
    passed,
    detail,
  }
}

/// Evaluates a rendered document against the page contract.
pub fn check_document(html: &str) -> Result<CheckReport, PageError> {
  let document = Html::parse_document(html);
  let binding = page::click_binding();
  let mut checks = Vec::new();

  let headings: Vec<String> = document
    .select(&HEADINGS)
    .map(|h| h.text().collect::<String>())
    .collect();
  checks.push(outcome(
    "heading",
    headings.iter().any(|h| h == PAGE_TITLE),
    format!("found headings {:?}", headings),
  ));

  let fact_count = document
    .select(&PARAGRAPHS)
    .filter(|p| p.text().collect::<String>() == SQUIRE_FACT)
    .count();
  checks.push(outcome(
    "fact-paragraph",
    fact_count == 1,
    format!("{} paragraph(s) carry the squire fact", fact_count),
  ));

  let target_count = elements_with_id(&document, binding.target_id()).len();
  checks.push(outcome(
    "bind-target",
    target_count == 1,
    format!("{} element(s) with id '{}'", target_count, binding.target_id()),
  ));

  let mut alerts = RecordedAlerts::default();
  if let Some(listener) = binding.run(&document) {
    listener.click(&mut alerts);
  }
  checks.push(outcome(
    "click-alert",
    alerts.0.len() == 1 && alerts.0[0] == binding.message(),
    format!("one click raised {} alert(s)", alerts.0.len()),
  ));

  let expected_script = binding.to_script()?;
  let script_found = document
    .select(&INLINE_SCRIPTS)
    .any(|s| s.text().collect::<String>().contains(expected_script.trim()));
  checks.push(outcome(
    "guarded-script",
    script_found,
    if script_found {
      "inline script binds the target and tolerates its absence".to_string()
    } else {
      "no inline script with the guarded click binding".to_string()
    },
  ));

  let missing: Vec<&str> = ASSETS
    .iter()
    .filter(|a| !html.contains(a.url))
    .map(|a| a.name)
    .collect();
  checks.push(outcome(
    "assets",
    missing.is_empty(),
    if missing.is_empty() {
      format!("all {} assets referenced", ASSETS.len())
    } else {
      format!("missing: {}", missing.join(", "))
    },
  ));

  Ok(CheckReport { checks })
}

fn load_document(path: Option<&Path>) -> Result<String, PageError> {
  match path {
    Some(p) => {
      info!("Checking document {}", p.display());
      std::fs::read_to_string(p).map_err(|e| PageError::DocumentReadError {
        path: p.to_path_buf(),
        source: e,
      })
    }
    None => {
      info!("Checking freshly rendered page");
      page::render_page()
    }
  }
}

pub fn run_check(args: CheckArgs) -> Result<(), PageError> {
  let html = load_document(args.path.as_deref())?;
  let report = check_document(&html)?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    for check in &report.checks {
      let mark = if check.passed { "ok" } else { "FAIL" };
      println!("{:<4} | {:<15} | {}", mark, check.name, check.detail);
    }
  }

  if report.is_ok() {
    info!("✅ Document satisfies the page contract.");
    Ok(())
  } else {
    error!("Document failed {} check(s).", report.failed());
    Err(PageError::ContractViolation {
      failed: report.failed(),
      total: report.checks.len(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn failing(report: &CheckReport) -> Vec<&'static str> {
    report
      .checks
      .iter()
      .filter(|c| !c.passed)
      .map(|c| c.name)
      .collect()
  }

  #[test]
  fn rendered_page_passes_every_check() {
    let report = check_document(&page::render_page().unwrap()).unwrap();
    assert!(report.is_ok(), "failed: {:?}", failing(&report));
    assert_eq!(report.checks.len(), 6);
  }

  #[test]
  fn removed_button_fails_binding_without_fault() {
    let html = page::render_page()
      .unwrap()
      .replace(r#"<button id="myButton" class="btn btn-primary">Learn More</button>"#, "");
    let report = check_document(&html).unwrap();
    assert_eq!(failing(&report), vec!["bind-target", "click-alert"]);
  }

  #[test]
  fn duplicate_button_is_flagged() {
    let html = page::render_page().unwrap().replace(
      "</button>",
      "</button><a id=\"myButton\">again</a>",
    );
    let report = check_document(&html).unwrap();
    assert_eq!(failing(&report), vec!["bind-target"]);
  }

  #[test]
  fn repeated_fact_is_flagged() {
    let fact = format!("<p class=\"card-text\">{}</p>", SQUIRE_FACT);
    let html = page::render_page()
      .unwrap()
      .replace(&fact, &format!("{fact}{fact}"));
    let report = check_document(&html).unwrap();
    assert_eq!(failing(&report), vec!["fact-paragraph"]);
  }

  #[test]
  fn fact_must_match_verbatim() {
    let fact = format!("<p class=\"card-text\">{}</p>", SQUIRE_FACT);
    let padded = format!("<p class=\"card-text\"> {} </p>", SQUIRE_FACT);
    let html = page::render_page().unwrap().replace(&fact, &padded);
    let report = check_document(&html).unwrap();
    assert_eq!(failing(&report), vec!["fact-paragraph"]);
  }

  #[test]
  fn unguarded_script_is_flagged() {
    let html = page::render_page().unwrap().replace("if (!target)", "if (false)");
    let report = check_document(&html).unwrap();
    assert_eq!(failing(&report), vec!["guarded-script"]);
  }

  #[test]
  fn report_serializes_to_json() {
    let report = check_document(&page::render_page().unwrap()).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["checks"][0]["name"], "heading");
    assert_eq!(value["checks"][0]["passed"], true);
  }
}
