use axum::{routing::get, routing::put, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::SharedCatalog;
use crate::predict::Sgp4Elements;

use super::api::catalog as catalog_handlers;
use super::api::next_pass as pass_handlers;
use super::api_doc::ApiDoc;
use super::state::{AppState, StationScheduler};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pass API endpoints
        .route("/api/next-pass", get(pass_handlers::next_pass))
        .route("/api/next-pass/{name}", get(pass_handlers::next_pass_for))
        // Catalog API endpoints
        .route("/api/catalog", get(catalog_handlers::list_catalog))
        .route(
            "/api/catalog/{name}/active",
            put(catalog_handlers::set_active),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(
    bind_addr: &str,
    catalog: SharedCatalog<Sgp4Elements>,
    scheduler: StationScheduler,
) -> std::io::Result<()> {
    let state = AppState {
        catalog,
        scheduler: Arc::new(scheduler),
    };
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await
}
