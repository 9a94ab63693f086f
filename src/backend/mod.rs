mod auth;
pub mod error;
mod handlers;
mod insights;
mod routes;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::ai::AiClient;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub ai: Arc<AiClient>,
    pub config: Arc<Config>,
}

pub async fn run_server(pool: Pool<Sqlite>, config: Config) -> anyhow::Result<()> {
    let ai = Arc::new(AiClient::new(config.ai.clone())?);
    let state = AppState {
        db: pool,
        ai,
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/health", get(|| async { "Backend is running" }))
        .merge(routes::api_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        )))
        .with_state(state.clone());

    let addr = state.config.bind_addr;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
