mod handlers;
mod services;

use crate::handlers::widget_handlers::{init_widget_handlers, AppState};
use crate::services::widget_service::WidgetService;
use apikit::config::Config;
use apikit::write_json;
use axum::http::StatusCode;
use axum::response::Response;
use axum::{routing::get, Router};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match Config::parse().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("{:#}, falling back to defaults", e);
            Config::default()
        }
    };

    let app_state = Arc::new(AppState {
        widget_service: WidgetService::seeded().await,
    });

    let app = Router::new()
        .route("/health", get(health))
        .nest("/widgets", init_widget_handlers(app_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(config.server.request_timeout())),
        );

    let addr = config.server.addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Response {
    write_json(StatusCode::OK, &json!({ "status": "ok" }))
}
