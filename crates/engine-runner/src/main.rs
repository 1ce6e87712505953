//! Nightfall Engine - authoritative runtime for night-one werewolf rooms.
//!
//! This crate is the composition root: it wires the pure engine core
//! (`nightfall-engine`) to its concrete ports (`nightfall-engine-adapters`)
//! and serves the result over a WebSocket HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use nightfall_engine::Host;
use nightfall_engine_adapters::{
    logging, websocket_router, AppConfig, FileSnapshotPersistence, LoggingAudioDispatchPort,
    SystemClockPort, ThreadRandomPort, WebSocketTransport,
};

/// Spawns a task that cancels `cancel_token` on Ctrl+C or SIGTERM.
fn setup_shutdown_signal(cancel_token: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
            _ = terminate => tracing::info!("received SIGTERM, shutting down"),
        }

        cancel_token.cancel();
    });
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        tracing::warn!("CORS configured to allow any origin");
        return CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    }

    let origins: Vec<_> = allowed_origins.iter().filter_map(|origin| origin.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::init_tracing(&config.log_filter_default);

    tracing::info!("starting Nightfall Engine");
    tracing::info!(bind_addr = %config.bind_addr, "configuration loaded");
    tracing::info!(
        wolf_vote_deadline_secs = config.wolf_vote_deadline_secs,
        "wolf vote window is a compiled-in constant; this value is informational only"
    );

    let cancel_token = CancellationToken::new();
    setup_shutdown_signal(cancel_token.clone());

    let transport = WebSocketTransport::new();
    let persistence = Arc::new(FileSnapshotPersistence::new(config.snapshot_dir.clone()));
    let audio = Arc::new(LoggingAudioDispatchPort::new());
    let clock = Arc::new(SystemClockPort::new());
    let random = Arc::new(ThreadRandomPort::new());

    let host = Host::new(Arc::new(transport.clone()), persistence, audio, clock, random);

    let app = Router::new()
        .route("/", axum::routing::get(|| async { "Nightfall Engine" }))
        .merge(websocket_router(host, &transport))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins));

    let addr: SocketAddr = config.bind_addr;
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            tracing::info!("HTTP server received shutdown signal");
        })
        .await?;

    tracing::info!("Nightfall Engine shutdown complete");
    Ok(())
}
