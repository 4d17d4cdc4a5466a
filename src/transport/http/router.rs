use crate::domain::cliente::ClienteRecord;
use crate::domain::envelope::{ClienteListResponse, ClienteResponse};
use crate::transport::http::handlers::{clientes, health};
use crate::transport::http::types::HealthResponse;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        clientes::list_handler,
        clientes::get_handler,
        clientes::create_handler,
        clientes::update_handler,
        clientes::patch_handler,
        clientes::delete_handler,
        clientes::search_by_document_handler
    ),
    components(schemas(ClienteRecord, ClienteResponse, ClienteListResponse, HealthResponse))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/clientes/",
            get(clientes::list_handler).post(clientes::create_handler),
        )
        .route(
            "/api/clientes/buscar_por_documento/",
            get(clientes::search_by_document_handler),
        )
        .route(
            "/api/clientes/:id/",
            get(clientes::get_handler)
                .put(clientes::update_handler)
                .patch(clientes::patch_handler)
                .delete(clientes::delete_handler),
        )
        .with_state(app_state)
}
