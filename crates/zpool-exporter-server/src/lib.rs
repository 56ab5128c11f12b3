//! HTTP scrape endpoint for zpool-exporter.
//!
//! Serves `GET /metrics` in the Prometheus text format. Every request
//! performs one fresh scrape: the configured `zpool` invocations run on the
//! blocking pool, their output is parsed and assembled by the core crate,
//! and the resulting families are rendered together with the exporter's own
//! collection-duration histogram. Nothing is cached between requests.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use prometheus::{Encoder, Histogram, HistogramOpts, Registry, TextEncoder};
use serde::Serialize;

use zpool_exporter_core::collector::PoolCollector;
use zpool_exporter_core::runner::CommandRunner;

mod render;

pub use render::render;

/// Shared server state.
struct AppState<R: CommandRunner> {
    collector: PoolCollector<R>,
    registry: Registry,
    collect_seconds: Histogram,
}

impl<R: CommandRunner> AppState<R> {
    fn new(collector: PoolCollector<R>) -> Self {
        let registry = Registry::new();
        let collect_seconds = Histogram::with_opts(HistogramOpts::new(
            "zpool_iostat_collector_collect_seconds",
            "Time spent to collect metrics from the zpool commands",
        ))
        .expect("static self-metric options are valid");
        registry
            .register(Box::new(collect_seconds.clone()))
            .expect("self-metric registers exactly once");
        Self {
            collector,
            registry,
            collect_seconds,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn handle_metrics<R: CommandRunner + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Response {
    let shared = Arc::clone(&state);
    let scrape = match tokio::task::spawn_blocking(move || shared.collector.collect()).await {
        Ok(scrape) => scrape,
        Err(err) => {
            log::error!("scrape task failed: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "scrape task failed").into_response();
        }
    };
    state.collect_seconds.observe(scrape.elapsed.as_secs_f64());

    let mut body = render::render(&scrape.families);

    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    if let Err(err) = encoder.encode(&state.registry.gather(), &mut buf) {
        log::error!("failed to encode self metrics: {err}");
    }
    body.push_str(&String::from_utf8_lossy(&buf));

    ([(header::CONTENT_TYPE, encoder.format_type().to_string())], body).into_response()
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: zpool_exporter_core::VERSION,
    })
}

async fn handle_index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "zpool-exporter",
        "version": zpool_exporter_core::VERSION,
        "endpoints": {
            "/metrics": "Prometheus text exposition (one fresh scrape per request)",
            "/health": "Liveness check",
        },
    }))
}

/// Build the axum router.
pub fn build_router<R: CommandRunner + 'static>(collector: PoolCollector<R>) -> Router {
    let state = Arc::new(AppState::new(collector));

    Router::new()
        .route("/", get(handle_index))
        .route("/metrics", get(handle_metrics::<R>))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Run the HTTP exposition server until ctrl-c.
pub async fn run_server<R: CommandRunner + 'static>(
    collector: PoolCollector<R>,
    host: &str,
    port: u16,
) -> std::io::Result<()> {
    let app = build_router(collector);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to install ctrl-c handler: {err}");
    }
}
