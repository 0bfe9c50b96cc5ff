//! HTTP surface: the metrics endpoint and a landing page

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use lastwrite_core::{Error, Result, ShutdownSignal};
use prometheus::{Encoder, Registry, TextEncoder};
use tokio::{net::TcpListener, sync::broadcast};

struct AppState {
    registry: Registry,
    telemetry_path: String,
}

/// Router serving the registry at `telemetry_path`, plus `/` unless the
/// metrics live there.
pub fn router(registry: Registry, telemetry_path: &str) -> Router {
    let state = Arc::new(AppState {
        registry,
        telemetry_path: telemetry_path.to_string(),
    });

    let router = Router::new().route(telemetry_path, get(metrics));
    let router = if telemetry_path == "/" {
        router
    } else {
        router.route("/", get(landing_page))
    };
    router.with_state(state)
}

/// Serve until the first shutdown signal, then drain in-flight requests.
///
/// # Errors
///
/// Returns error if the server fails while running
pub async fn serve(
    listener: TcpListener,
    app: Router,
    mut shutdown: broadcast::Receiver<ShutdownSignal>,
) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await
        .map_err(|e| Error::io_error(format!("HTTP server failed: {e}")))
}

async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    let encoder = TextEncoder::new();
    let families = state.registry.gather();
    let mut body = Vec::new();

    match encoder.encode(&families, &mut body) {
        Ok(()) => (
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn landing_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(format!(
        "<html>\n<head><title>lastwrite</title></head>\n<body>\n<h1>lastwrite</h1>\n\
         <p><a href=\"{path}\">Metrics</a></p>\n</body>\n</html>\n",
        path = state.telemetry_path
    ))
}
