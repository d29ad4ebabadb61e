use std::future::Future;

use axum::extract::Request;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_http::validate_request::ValidateRequestHeaderLayer;
use tracing::{error, info_span};

use crate::auth::TokenValidate;
use crate::config::Config;
use crate::recorder::RecordingManager;
use crate::store::MemStorage;

mod auth;
pub mod config;
mod error;
pub mod log;
mod model;
mod recorder;
mod result;
mod route;
mod seed;
mod store;

#[derive(Clone)]
struct AppState {
    config: Config,
    storage: MemStorage,
    recorder: RecordingManager,
}

pub async fn serve<F>(cfg: Config, listener: TcpListener, signal: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let storage = MemStorage::new();
    let recorder = RecordingManager::new(cfg.recording.root.clone());
    if cfg.demo.seed {
        seed::populate(&storage);
    }

    let app_state = AppState {
        config: cfg.clone(),
        storage,
        recorder,
    };

    let app = Router::new()
        .merge(route::camera::route())
        .merge(route::recording::route())
        .merge(route::alert::route())
        .merge(route::stream::route())
        .layer(ValidateRequestHeaderLayer::custom(TokenValidate::new(
            cfg.auth.tokens.clone(),
        )))
        .layer(if cfg.http.cors {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
        })
        .with_state(app_state)
        .layer(axum::middleware::from_fn(log::print_request_response))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                info_span!(
                    "http_request",
                    uri = ?request.uri(),
                    method = ?request.method(),
                )
            }),
        );

    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await
        .unwrap_or_else(|e| error!("Application error: {e}"));
}
