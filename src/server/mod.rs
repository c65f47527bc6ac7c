use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::ingest::ImportLayout;
use crate::storage::LotStore;

pub mod routes;

/// Largest accepted upload body
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Server state
///
/// Owns the one store connection shared by every request.
pub struct AppState {
    pub store: Mutex<LotStore>,
    pub layout: ImportLayout,
}

impl AppState {
    pub fn new(store: LotStore, layout: ImportLayout) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(store),
            layout,
        })
    }
}

/// Build the HTTP router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::get_lot))
        .route("/all", get(routes::list_lots))
        .route("/part", get(routes::lots_by_part))
        .route("/count", get(routes::count_lots))
        .route("/update", get(routes::update_form).post(routes::upload_lots))
        .route("/delete", get(routes::delete_form).post(routes::delete_lot))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
