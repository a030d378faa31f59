pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all routes and middleware over the project's
/// item file. Used by `serve_on()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    router(state::AppState::new(root))
}

/// Build the Router over a caller-supplied item store. `root` still supplies
/// the project config.
pub fn build_router_with_store(root: PathBuf, store: state::SharedStore) -> Router {
    router(state::AppState::with_store(root, store))
}

fn router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Item CRUD contract
        .route(
            "/items",
            get(routes::items::list_items).post(routes::items::create_item),
        )
        .route(
            "/items/{id}",
            put(routes::items::update_item).delete(routes::items::delete_item),
        )
        // Dashboard read models
        .route("/api/niches", get(routes::stages::list_niches))
        .route("/api/stages/{niche}", get(routes::stages::get_stages))
        .route("/api/board", get(routes::board::get_board))
        .route("/api/board/{id}/move", post(routes::board::move_item))
        .route("/api/revenue", get(routes::revenue::get_revenue))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the server on a pre-bound listener.
///
/// The caller binds so it can report the actual port when binding port 0.
pub async fn serve_on(root: PathBuf, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(root.clone());

    tracing::info!(root = %root.display(), "stageboard listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
