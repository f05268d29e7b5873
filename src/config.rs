// src/config.rs
use std::net::SocketAddr;
use std::time::Duration;

use crate::cli::ServeArgs;
use crate::error::PageError;

/// Per-request limits applied by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeouts {
  /// Time allowed to read a request body.
  pub body_read: Duration,
  /// Time allowed to produce a response; exceeding it answers 408.
  pub response: Duration,
}

impl Default for RequestTimeouts {
  fn default() -> Self {
    Self {
      body_read: Duration::from_secs(5),
      response: Duration::from_secs(10),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub addr: SocketAddr,
  pub shutdown_timeout: Duration,
  pub timeouts: RequestTimeouts,
}

impl ServerConfig {
  pub fn from_args(args: &ServeArgs) -> Result<Self, PageError> {
    let raw = if args.host.contains(':') && !args.host.starts_with('[') {
      // Bare IPv6 literal
      format!("[{}]:{}", args.host, args.port)
    } else {
      format!("{}:{}", args.host, args.port)
    };
    let addr = raw
      .parse::<SocketAddr>()
      .map_err(|e| PageError::InvalidAddress { addr: raw, source: e })?;
    Ok(Self {
      addr,
      shutdown_timeout: Duration::from_secs(args.shutdown_timeout_secs),
      timeouts: RequestTimeouts {
        body_read: Duration::from_secs(args.read_timeout_secs),
        response: Duration::from_secs(args.write_timeout_secs),
      },
    })
  }
}
