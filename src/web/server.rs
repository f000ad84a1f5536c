use axum::{routing::get, Router};
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::telemetry as telemetry_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub fn router(state: AppState, public_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Telemetry API endpoints
        .route("/api/ids", get(telemetry_handlers::list_ids))
        .route("/api/data/{id}", get(telemetry_handlers::get_series))
        // An empty last segment is not an id
        .route("/api/data/", get(telemetry_handlers::missing_id))
        .route("/api/data/{id}/", get(telemetry_handlers::missing_id))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Front-end; directory requests fall through to index.html
        .fallback_service(ServeDir::new(public_dir))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config, state: AppState) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let app = router(state, &config.web.public_dir);

    log::info!(
        "Serving {} on http://{}",
        config.web.public_dir.display(),
        bind_addr
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
