// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
  #[error("IO Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON Encoding Error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Could not read document '{path}': {source}")]
  DocumentReadError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to write rendered page to '{path}': {source}")]
  OutputWrite {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Template left unresolved placeholders: {}", .0.join(", "))]
  UnresolvedPlaceholders(Vec<String>),

  #[error("Invalid listen address '{addr}': {source}")]
  InvalidAddress {
    addr: String,
    #[source]
    source: std::net::AddrParseError,
  },

  #[error("Failed to bind {addr}: {source}")]
  Bind {
    addr: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Server error: {0}")]
  Server(#[source] std::io::Error),

  #[error("Could not start async runtime: {0}")]
  Runtime(#[source] std::io::Error),

  #[error("Document violates the page contract ({failed} of {total} checks failed)")]
  ContractViolation { failed: usize, total: usize },
}

/// Faults raised by the client-side click binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
  #[error("Bind target '#{id}' is absent from the document")]
  TargetAbsent { id: String },
}
