use anyhow::{Context, Result};
use std::time::Duration;

use axum::{extract::State, middleware, routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::{api, log_requests, state::*, views, ServerConfig};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    uptime: String,
    version: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime: format_uptime(state.start_time.elapsed()),
        version: format!("{}-{}", env!("CARGO_PKG_VERSION"), state.hash),
    })
}

pub fn make_app(config: ServerConfig, dashboard_store: GuardedDashboardStore) -> Router {
    let state = ServerState::new(config.clone(), dashboard_store);

    let api_routes: Router = Router::new()
        .route("/dashboard", get(api::get_dashboard))
        .route("/metrics", get(api::get_metrics).post(api::post_metric))
        .route("/employees", get(api::get_employees).post(api::post_employee))
        .route("/sales", get(api::get_sales).post(api::post_sale))
        .with_state(state.clone());

    let mut app: Router = Router::new()
        .route("/", get(views::dashboard_page))
        .route("/employees", get(views::employees_page))
        .route("/sales", get(views::sales_page))
        .route("/health", get(health))
        .with_state(state.clone())
        .nest("/api", api_routes);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }
    app = app.layer(middleware::from_fn_with_state(state, log_requests));

    app
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

pub async fn run_server(
    config: ServerConfig,
    bind_address: &str,
    dashboard_store: GuardedDashboardStore,
) -> Result<()> {
    let app = make_app(config, dashboard_store);

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Ready to serve at {}!", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
