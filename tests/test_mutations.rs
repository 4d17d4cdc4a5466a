//! Pre-flight checks on writes and the edit/save/refresh cycle.

mod common;

use cliente_directory::{
    ClientConfig, ClienteRecord, ClienteStore, DirectoryError, DirectoryManager, ErrorKind,
    MutationCoordinator, NavEvent, Navigation, Screen,
};
use common::{ana, comercial, spawn_reference_server, ScriptedGateway};
use std::sync::Arc;

#[tokio::test]
async fn blank_required_fields_block_create_and_update_without_a_call() {
    let gw = Arc::new(ScriptedGateway::new());
    let coordinator = MutationCoordinator::new(gw.clone());

    let mut record = ana();
    record.nombre = "  ".into();
    record.email = String::new();

    let err = coordinator.create(&record).await.unwrap_err();
    assert_eq!(
        err,
        DirectoryError::Validation(vec!["nombre".into(), "email".into()])
    );
    assert_eq!(err.to_string(), "Campos requeridos vacíos: nombre, email");

    let err = coordinator.update(1, &record).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(gw.calls(), 0);

    let everything_blank = ClienteRecord::default();
    let err = MutationCoordinator::validate(&everything_blank).unwrap_err();
    assert_eq!(
        err,
        DirectoryError::Validation(vec![
            "nombre".into(),
            "apellido".into(),
            "telefono".into(),
            "email".into(),
            "tipo_documento".into(),
            "numero_documento".into(),
        ])
    );
}

#[tokio::test]
async fn patch_skips_validation() {
    let gw = Arc::new(ScriptedGateway::new());
    let coordinator = MutationCoordinator::new(gw.clone());

    // The scripted gateway rejects unscripted writes, so reaching it is the point.
    let err = coordinator.patch(1, &ClienteRecord::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(gw.calls(), 1);
}

#[tokio::test]
async fn edit_then_save_refreshes_the_directory() {
    let mut store = ClienteStore::new();
    store.insert(ana());
    store.insert(comercial());
    let base = spawn_reference_server(store).await;
    let manager = DirectoryManager::from_config(&ClientConfig::new(base)).unwrap();
    manager.load().await.unwrap();

    let mut nav = Navigation::new();
    let target = manager.records()[1].clone();
    assert!(nav.apply(NavEvent::OpenEdit(target.clone())));
    assert_eq!(nav.screen(), &Screen::EditarCliente(target.clone()));

    let mut edited = manager.fetch_record(2).await.unwrap();
    edited.telefono = "014445566".into();
    manager.update_record(2, &edited).await.unwrap();
    // Not merged locally until the directory refreshes.
    assert_eq!(manager.records()[1].telefono, "2");

    assert!(nav.apply(NavEvent::Saved));
    assert_eq!(nav.screen(), &Screen::Clientes);
    assert!(manager.refresh(nav.revision()).await.unwrap());
    assert_eq!(manager.records()[1].telefono, "014445566");

    // Closing without saving leaves the revision alone.
    assert!(nav.apply(NavEvent::OpenCreate));
    assert!(nav.apply(NavEvent::Close));
    assert!(!manager.refresh(nav.revision()).await.unwrap());
}

#[tokio::test]
async fn patch_through_manager_changes_only_given_fields() {
    let mut store = ClienteStore::new();
    store.insert(ana());
    let base = spawn_reference_server(store).await;
    let manager = DirectoryManager::from_config(&ClientConfig::new(base)).unwrap();

    let mut patch = ClienteRecord::default();
    patch.email = "ana.diaz@correo.pe".into();
    let patched = manager.patch_record(1, &patch).await.unwrap();
    assert_eq!(patched.email, "ana.diaz@correo.pe");
    assert_eq!(patched.nombre, "Ana");
    assert_eq!(patched.numero_documento, "12345678");
}
