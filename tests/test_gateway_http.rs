//! HttpGateway against the in-process reference service and a few hand-rolled
//! misbehaving servers.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use cliente_directory::{
    ClientConfig, ClienteRecord, ClienteStore, DirectoryError, ErrorKind, HttpGateway,
    RecordGateway, TipoDocumento,
};
use common::{ana, comercial, dead_base_url, spawn_reference_server, spawn_router};
use serde_json::json;
use std::time::Duration;

fn gateway(base_url: &str) -> HttpGateway {
    HttpGateway::new(&ClientConfig::new(base_url).with_timeout(Some(Duration::from_secs(5)))).unwrap()
}

fn seeded() -> ClienteStore {
    let mut store = ClienteStore::new();
    store.insert(ana());
    store.insert(comercial());
    store
}

#[tokio::test]
async fn crud_round_trip_through_reference_service() -> Result<(), Box<dyn std::error::Error>> {
    let base = spawn_reference_server(ClienteStore::new()).await;
    let gw = gateway(&base);

    assert!(gw.list().await?.is_empty());

    // Any id on the input is ignored; the server assigns one.
    let created = gw.create(&ana().with_id(50)).await?;
    assert_eq!(created.id, Some(1));
    assert_eq!(created.nombre, "Ana");

    let fetched = gw.get(1).await?;
    assert_eq!(fetched, created);

    // The path id wins over the body's.
    let mut replacement = ana().with_id(99);
    replacement.email = "ana@nuevo.pe".into();
    let updated = gw.update(1, &replacement).await?;
    assert_eq!(updated.id, Some(1));
    assert_eq!(updated.email, "ana@nuevo.pe");

    let mut patch = ClienteRecord::default();
    patch.telefono = "999888777".into();
    let patched = gw.patch(1, &patch).await?;
    assert_eq!(patched.telefono, "999888777");
    assert_eq!(patched.email, "ana@nuevo.pe");
    assert_eq!(patched.tipo_documento, TipoDocumento::Dni);

    gw.delete(1).await?;
    assert_eq!(gw.get(1).await.unwrap_err(), DirectoryError::NotFound(1));
    assert!(gw.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn base_url_without_trailing_slash_is_normalized() {
    let base = spawn_reference_server(seeded()).await;
    let gw = gateway(base.trim_end_matches('/'));
    assert_eq!(gw.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn search_by_document_type_upper_cases_tipo() {
    let base = spawn_reference_server(seeded()).await;
    let gw = gateway(&base);

    let dni = gw.search_by_document_type("dni").await.unwrap();
    assert_eq!(dni.len(), 1);
    assert_eq!(dni[0].numero_documento, "12345678");

    let ruc = gw.search_by_document_type(" RUC ").await.unwrap();
    assert_eq!(ruc.len(), 1);
    assert_eq!(ruc[0].tipo_documento, TipoDocumento::Ruc);

    let err = gw.search_by_document_type("CE").await.unwrap_err();
    assert!(matches!(err, DirectoryError::Protocol { status: 400, .. }));
}

#[tokio::test]
async fn missing_record_is_not_found_on_get_and_protocol_elsewhere() {
    let base = spawn_reference_server(ClienteStore::new()).await;
    let gw = gateway(&base);

    let err = gw.get(7).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Cliente 7 no encontrado");

    let err = gw.update(7, &ana()).await.unwrap_err();
    assert_eq!(err.to_string(), "Error 404: Cliente no encontrado");

    let err = gw.delete(7).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Protocol { status: 404, .. }));
}

#[tokio::test]
async fn server_side_validation_surfaces_field_errors() {
    let base = spawn_reference_server(seeded()).await;
    let gw = gateway(&base);

    let mut blank = ana();
    blank.email = String::new();
    blank.numero_documento = "87654321".into();
    let err = gw.create(&blank).await.unwrap_err();
    assert_eq!(err.to_string(), "Error 400: Datos inválidos");
    let fields = err.field_errors().expect("field errors");
    assert_eq!(fields["email"], vec!["Este campo es requerido."]);
    assert_eq!(fields.len(), 1);

    // Same DNI as the seeded Ana.
    let err = gw.create(&ana()).await.unwrap_err();
    let fields = err.field_errors().expect("field errors");
    assert_eq!(
        fields["numero_documento"],
        vec!["Ya existe un cliente con este documento."]
    );

    // A record may keep its own document on update.
    let kept = gw.update(1, &ana()).await.unwrap();
    assert_eq!(kept.numero_documento, "12345678");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let gw = gateway(&dead_base_url().await);
    let err = gw.list().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().starts_with("Error de conexión: "));
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_reason_phrase() {
    let router = Router::new().route(
        "/api/clientes/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>") }),
    );
    let gw = gateway(&spawn_router(router).await);

    let err = gw.list().await.unwrap_err();
    assert_eq!(
        err,
        DirectoryError::Protocol {
            status: 500,
            message: "Internal Server Error".into(),
            errors: None,
        }
    );
}

#[tokio::test]
async fn unsuccessful_envelope_is_a_service_error() {
    let router = Router::new()
        .route(
            "/api/clientes/",
            get(|| async { Json(json!({ "success": false, "message": "Sin permisos" })) }),
        )
        .route(
            "/api/clientes/buscar_por_documento/",
            get(|| async { Json(json!({ "success": false })) }),
        );
    let gw = gateway(&spawn_router(router).await);

    let err = gw.list().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.to_string(), "Sin permisos");

    let err = gw.search_by_document_type("DNI").await.unwrap_err();
    assert_eq!(err.to_string(), "Error desconocido");
}

#[tokio::test]
async fn undecodable_success_body_is_a_transport_error() {
    let router = Router::new().route("/api/clientes/", get(|| async { "definitely not json" }));
    let gw = gateway(&spawn_router(router).await);

    let err = gw.list().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn list_without_data_is_empty() {
    let router = Router::new().route(
        "/api/clientes/",
        get(|| async { Json(json!({ "success": true, "message": "vacío" })) }),
    );
    let gw = gateway(&spawn_router(router).await);
    assert!(gw.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let router = Router::new().route(
        "/api/clientes/:id/",
        delete(|| async { StatusCode::NO_CONTENT.into_response() }),
    );
    let gw = gateway(&spawn_router(router).await);
    gw.delete(3).await.unwrap();
}

#[tokio::test]
async fn delete_against_unreachable_server_is_a_transport_error() {
    let gw = gateway(&dead_base_url().await);
    let err = gw.delete(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
