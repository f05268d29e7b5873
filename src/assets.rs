// src/assets.rs
use std::io::{self, Write};

use crate::error::PageError;
use crate::page::ASSETS;

pub fn run_assets() -> Result<(), PageError> {
  let mut out = io::stdout().lock();
  write_assets(&mut out)?;
  out.flush()?;
  Ok(())
}

/// Writes the asset table: one row per external reference, in document order.
pub fn write_assets(out: &mut impl Write) -> Result<(), PageError> {
  writeln!(out, "External assets referenced by the page:")?;
  writeln!(out, "{:<15} | {:<10} | {}", "Name", "Kind", "URL")?;
  writeln!(out, "{:-<15}-+-{:-<10}-+-{:-<50}", "", "", "")?;
  for asset in &ASSETS {
    writeln!(
      out,
      "{:<15} | {:<10} | {}",
      asset.name,
      asset.kind.as_str(),
      asset.url
    )?;
  }
  Ok(())
}
