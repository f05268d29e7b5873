// src/serve.rs
use std::future::Future;
use std::io;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use log::{debug, error, info, warn};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};

use crate::cli::ServeArgs;
use crate::config::{RequestTimeouts, ServerConfig};
use crate::error::PageError;
use crate::page;

#[derive(Debug, Clone)]
struct AppState {
  page: Bytes,
}

/// Every path gets the page; methods other than GET and HEAD get 405.
pub fn router(page: Bytes, timeouts: &RequestTimeouts) -> Router {
  Router::new()
    .fallback(serve_page)
    .with_state(AppState { page })
    .layer(RequestBodyTimeoutLayer::new(timeouts.body_read))
    .layer(TimeoutLayer::new(timeouts.response))
}

async fn serve_page(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
  debug!("{} {}", method, uri.path());
  if method != Method::GET && method != Method::HEAD {
    warn!("Rejecting {} {}", method, uri.path());
    return (
      StatusCode::METHOD_NOT_ALLOWED,
      [(header::ALLOW, "GET, HEAD")],
      "Method not allowed",
    )
      .into_response();
  }
  (
    [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
    state.page,
  )
    .into_response()
}

pub fn run_serve(args: ServeArgs) -> Result<(), PageError> {
  let config = ServerConfig::from_args(&args)?;
  debug!("Server config: {:?}", config);

  // Rendered once; every response shares the same buffer.
  let page = Bytes::from(page::render_page()?);

  let runtime = tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()
    .map_err(PageError::Runtime)?;

  runtime.block_on(async move {
    let listener = TcpListener::bind(config.addr)
      .await
      .map_err(|e| PageError::Bind {
        addr: config.addr.to_string(),
        source: e,
      })?;
    info!("🚀 Serving Squire's Page on http://{}", listener.local_addr()?);
    let app = router(page, &config.timeouts);
    serve_with_shutdown(listener, app, ctrl_c(), config.shutdown_timeout).await
  })
}

/// Serves until `shutdown` resolves, then gives in-flight requests up to `grace` to finish.
pub async fn serve_with_shutdown<F>(
  listener: TcpListener,
  app: Router,
  shutdown: F,
  grace: Duration,
) -> Result<(), PageError>
where
  F: Future<Output = ()> + Send + 'static,
{
  let (signalled_tx, mut signalled_rx) = watch::channel(false);
  let server = axum::serve(listener, app).with_graceful_shutdown(async move {
    shutdown.await;
    info!("⚠️  Shutdown requested. Stopping server...");
    let _ = signalled_tx.send(true);
  });
  let mut server_task = tokio::spawn(async move { server.await });

  tokio::select! {
    finished = &mut server_task => return join_server(finished),
    _ = signalled_rx.changed() => {}
  }

  match tokio::time::timeout(grace, server_task).await {
    Ok(finished) => join_server(finished)?,
    Err(_) => warn!(
      "In-flight requests did not finish within {:?}; dropping them.",
      grace
    ),
  }
  info!("✅ Server shut down.");
  Ok(())
}

fn join_server(
  finished: Result<io::Result<()>, tokio::task::JoinError>,
) -> Result<(), PageError> {
  match finished {
    Ok(result) => result.map_err(PageError::Server),
    Err(join_err) => Err(PageError::Server(io::Error::other(join_err))),
  }
}

async fn ctrl_c() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!("Failed to listen for Ctrl-C: {}", e);
    std::future::pending::<()>().await;
  }
}
