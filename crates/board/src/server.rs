use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::render::render_page;
use crate::state::AppState;

async fn page_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let view = state.view().await;
    Html(render_page(&view, state.interval))
}

async fn prices_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.view().await)
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/prices", get(prices_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve<F>(state: Arc<AppState>, port: u16, shutdown: F) -> eyre::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
