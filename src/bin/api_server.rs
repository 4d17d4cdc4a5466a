// src/bin/api_server.rs

use cliente_directory::infra::{config, logging};
use cliente_directory::transport;
use cliente_directory::ClienteStore;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    // --- Store Initialization ---
    let store = if config::api_server_seed() {
        tracing::info!("Seeding store with sample clientes (API_SERVER_SEED=true)");
        ClienteStore::with_samples()
    } else {
        ClienteStore::new()
    };
    let app_state = transport::http::AppState::new(store);

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let bind = config::api_server_bind();
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("Clientes API listening on http://{}", listener.local_addr()?);
    tracing::info!("Swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, stopping (in-memory data is discarded)");
        }
    }

    Ok(())
}
