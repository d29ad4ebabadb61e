use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{error, info, warn};

pub fn set(env_filter: String) {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(env_filter)))
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .init();
}

pub async fn print_request_response(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let res = next.run(req).await;

    let status = res.status().as_u16();
    let duration = start.elapsed().as_millis();
    if res.status().is_client_error() || res.status().is_server_error() {
        error!("[{} {}] [{}] {}ms", method, uri, status, duration);
    } else if duration > 500 {
        warn!("[{} {}] [{}] {}ms", method, uri, status, duration);
    } else {
        info!("[{} {}] [{}] {}ms", method, uri, status, duration);
    }
    res
}
