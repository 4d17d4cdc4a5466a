use crate::domain::cliente::{ClienteRecord, TipoDocumento};
use crate::domain::envelope::{ClienteListResponse, ClienteResponse};
use crate::transport::http::handlers::common::{
    field_errors, invalid_data, invalid_json, not_found,
};
use crate::transport::http::types::{AppState, DocumentSearchQuery, SEARCHABLE_TIPOS};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/clientes/",
    responses(
        (status = 200, description = "All clientes", body = ClienteListResponse)
    )
)]
pub async fn list_handler(State(state): State<AppState>) -> impl IntoResponse {
    let records = state.store.read().await.list();
    (
        StatusCode::OK,
        Json(ClienteListResponse::ok("Clientes obtenidos correctamente", records)),
    )
}

#[utoipa::path(
    get,
    path = "/api/clientes/{id}/",
    params(("id" = i64, Path, description = "Cliente id")),
    responses(
        (status = 200, description = "Cliente found", body = ClienteResponse),
        (status = 404, description = "Unknown id", body = ClienteResponse)
    )
)]
pub async fn get_handler(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match state.store.read().await.get(id) {
        Some(record) => (
            StatusCode::OK,
            Json(ClienteResponse::ok("Cliente obtenido correctamente", Some(record))),
        )
            .into_response(),
        None => not_found(),
    }
}

#[utoipa::path(
    post,
    path = "/api/clientes/",
    request_body = ClienteRecord,
    responses(
        (status = 201, description = "Cliente created", body = ClienteResponse),
        (status = 400, description = "Invalid data", body = ClienteResponse)
    )
)]
pub async fn create_handler(
    State(state): State<AppState>,
    request: Result<Json<ClienteRecord>, JsonRejection>,
) -> impl IntoResponse {
    let Json(record) = match request {
        Ok(v) => v,
        Err(e) => return invalid_json(e),
    };

    let mut store = state.store.write().await;
    if let Some(errors) = field_errors(&store, &record, None) {
        return invalid_data(errors);
    }
    let created = store.insert(record);
    tracing::info!(id = ?created.id, "reference service: cliente created");
    (
        StatusCode::CREATED,
        Json(ClienteResponse::ok("Cliente creado correctamente", Some(created))),
    )
        .into_response()
}

#[utoipa::path(
    put,
    path = "/api/clientes/{id}/",
    params(("id" = i64, Path, description = "Cliente id")),
    request_body = ClienteRecord,
    responses(
        (status = 200, description = "Cliente replaced", body = ClienteResponse),
        (status = 400, description = "Invalid data", body = ClienteResponse),
        (status = 404, description = "Unknown id", body = ClienteResponse)
    )
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request: Result<Json<ClienteRecord>, JsonRejection>,
) -> impl IntoResponse {
    let Json(record) = match request {
        Ok(v) => v,
        Err(e) => return invalid_json(e),
    };

    let mut store = state.store.write().await;
    if store.get(id).is_none() {
        return not_found();
    }
    if let Some(errors) = field_errors(&store, &record, Some(id)) {
        return invalid_data(errors);
    }
    match store.replace(id, record) {
        Some(updated) => (
            StatusCode::OK,
            Json(ClienteResponse::ok("Cliente actualizado correctamente", Some(updated))),
        )
            .into_response(),
        None => not_found(),
    }
}

#[utoipa::path(
    patch,
    path = "/api/clientes/{id}/",
    params(("id" = i64, Path, description = "Cliente id")),
    request_body = ClienteRecord,
    responses(
        (status = 200, description = "Non-blank fields applied", body = ClienteResponse),
        (status = 400, description = "Document already in use", body = ClienteResponse),
        (status = 404, description = "Unknown id", body = ClienteResponse)
    )
)]
pub async fn patch_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request: Result<Json<ClienteRecord>, JsonRejection>,
) -> impl IntoResponse {
    let Json(patch) = match request {
        Ok(v) => v,
        Err(e) => return invalid_json(e),
    };

    let mut store = state.store.write().await;
    let Some(mut merged) = store.get(id) else {
        return not_found();
    };
    merged.merge_non_blank(&patch);
    if let Some(errors) = field_errors(&store, &merged, Some(id)) {
        return invalid_data(errors);
    }
    match store.patch(id, &patch) {
        Some(updated) => (
            StatusCode::OK,
            Json(ClienteResponse::ok("Cliente actualizado parcialmente", Some(updated))),
        )
            .into_response(),
        None => not_found(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/clientes/{id}/",
    params(("id" = i64, Path, description = "Cliente id")),
    responses(
        (status = 200, description = "Cliente removed", body = ClienteResponse),
        (status = 404, description = "Unknown id", body = ClienteResponse)
    )
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.store.write().await.remove(id) {
        Some(_) => {
            tracing::info!(id, "reference service: cliente deleted");
            (
                StatusCode::OK,
                Json(ClienteResponse::ok("Cliente eliminado correctamente", None)),
            )
                .into_response()
        }
        None => not_found(),
    }
}

#[utoipa::path(
    get,
    path = "/api/clientes/buscar_por_documento/",
    params(DocumentSearchQuery),
    responses(
        (status = 200, description = "Clientes holding that document type", body = ClienteListResponse),
        (status = 400, description = "Missing or unsupported tipo", body = ClienteListResponse)
    )
)]
pub async fn search_by_document_handler(
    State(state): State<AppState>,
    Query(query): Query<DocumentSearchQuery>,
) -> impl IntoResponse {
    let Some(tipo) = query.tipo.map(|t| t.trim().to_uppercase()).filter(|t| !t.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ClienteListResponse::failure("Parámetro 'tipo' requerido")),
        )
            .into_response();
    };
    if !SEARCHABLE_TIPOS.contains(&tipo.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ClienteListResponse::failure(format!(
                "Tipo de documento inválido: {} (use {})",
                tipo,
                SEARCHABLE_TIPOS.join(" o ")
            ))),
        )
            .into_response();
    }

    let records = state.store.read().await.by_tipo(&TipoDocumento::from(tipo.as_str()));
    let message = format!("Clientes con {}: {}", tipo, records.len());
    (StatusCode::OK, Json(ClienteListResponse::ok(message, records))).into_response()
}

