use crate::domain::cliente::ClienteRecord;
use crate::domain::envelope::ClienteResponse;
use crate::error::FieldErrors;
use crate::storage::memory::ClienteStore;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const REQUIRED_MESSAGE: &str = "Este campo es requerido.";
pub const DUPLICATE_MESSAGE: &str = "Ya existe un cliente con este documento.";

pub fn failure(status: StatusCode, message: &str, errors: Option<FieldErrors>) -> Response {
    (status, Json(ClienteResponse::failure(message, errors))).into_response()
}

pub fn not_found() -> Response {
    failure(StatusCode::NOT_FOUND, "Cliente no encontrado", None)
}

pub fn invalid_json(err: JsonRejection) -> Response {
    failure(
        StatusCode::BAD_REQUEST,
        &format!("JSON inválido: {}", err),
        None,
    )
}

/// Blank required fields plus a document already held by another cliente.
///
/// `except` is the id being updated, which may keep its own document.
pub fn field_errors(
    store: &ClienteStore,
    record: &ClienteRecord,
    except: Option<i64>,
) -> Option<FieldErrors> {
    let mut errors = FieldErrors::new();
    for field in record.blank_fields() {
        errors.insert(field, vec![REQUIRED_MESSAGE.to_string()]);
    }
    if errors.is_empty()
        && store
            .document_holder(&record.tipo_documento, &record.numero_documento, except)
            .is_some()
    {
        errors.insert(
            "numero_documento".to_string(),
            vec![DUPLICATE_MESSAGE.to_string()],
        );
    }
    (!errors.is_empty()).then_some(errors)
}

pub fn invalid_data(errors: FieldErrors) -> Response {
    failure(StatusCode::BAD_REQUEST, "Datos inválidos", Some(errors))
}
