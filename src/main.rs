//! Surah Quiz · Backend
//!
//! - Axum HTTP + WebSocket API for a "which chapter is this verse from?" quiz
//! - Verses from the public recitation API, with built-in fallback verses
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   QUIZ_CONFIG_PATH    : path to TOML config (content API, game tunables, catalog check)
//!   QURAN_API_BASE_URL  : default "https://api.alquran.cloud/v1"
//!   QURAN_AUDIO_EDITION : default "ar.alafasy"
//!   QURAN_API_DISABLED  : "1" to serve built-in verses only
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod arabic;
mod catalog;
mod config;
mod content;
mod domain;
mod error;
mod logic;
mod options;
mod protocol;
mod routes;
mod scoring;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (in-memory stores, content client, config).
  let state = Arc::new(AppState::new());

  if state.config.catalog.validate_on_startup {
    match state.validate_catalog().await {
      Some(m) if m.is_empty() => info!(target: "surah_quiz", "Catalog matches content API"),
      Some(m) => warn!(target: "surah_quiz", mismatches = m.len(), "Catalog differs from content API"),
      None => warn!(target: "surah_quiz", "Catalog validation skipped"),
    }
  }

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "surah_quiz", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "surah_quiz", error = %e, "Could not listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  info!(target: "surah_quiz", "Shutdown signal received");
}
