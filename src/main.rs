//! Phrasecraft backend
//!
//! - Axum HTTP + WebSocket API over the scoring / sanitizing core
//! - Optional TOML configuration (thresholds, strategies, default language)
//!
//! Important env variables:
//!   PORT                     : u16 (default 3000)
//!   PHRASECRAFT_CONFIG_PATH  : path to TOML config
//!   LOG_LEVEL                : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT               : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use phrasecraft::routes::build_router;
use phrasecraft::state::AppState;
use phrasecraft::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "phrasecraft", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
