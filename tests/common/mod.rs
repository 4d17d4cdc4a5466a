//! Shared fixtures: an in-process reference server and a scripted gateway.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use cliente_directory::{
    transport, ClienteRecord, ClienteStore, DirectoryError, RecordGateway, Result,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

pub fn ana() -> ClienteRecord {
    ClienteRecord::new("Ana", "Diaz", "1", "a@b.c", "DNI", "12345678")
}

pub fn comercial() -> ClienteRecord {
    ClienteRecord::new("Comercial", "Andina SAC", "2", "v@andina.pe", "RUC", "20123456789")
}

/// Serves `router` on an ephemeral port; returns the base URL (with trailing slash).
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://127.0.0.1:{}/", port)
}

/// Starts the reference clientes service over `store`.
pub async fn spawn_reference_server(store: ClienteStore) -> String {
    let router = transport::http::create_router(transport::http::AppState::new(store));
    spawn_router(router).await
}

/// A base URL nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

/// In-memory [`RecordGateway`] answering from queued results and counting every call.
///
/// Unscripted `list`/`search` calls return an empty list; unscripted writes fail
/// with a transport error.
#[derive(Default)]
pub struct ScriptedGateway {
    calls: AtomicUsize,
    list_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    lists: Mutex<VecDeque<Result<Vec<ClienteRecord>>>>,
    searches: Mutex<VecDeque<Result<Vec<ClienteRecord>>>>,
    deletes: Mutex<VecDeque<Result<()>>>,
    hold_deletes: AtomicBool,
    release: Notify,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list(&self, result: Result<Vec<ClienteRecord>>) -> &Self {
        self.lists.lock().unwrap().push_back(result);
        self
    }

    pub fn push_search(&self, result: Result<Vec<ClienteRecord>>) -> &Self {
        self.searches.lock().unwrap().push_back(result);
        self
    }

    pub fn push_delete(&self, result: Result<()>) -> &Self {
        self.deletes.lock().unwrap().push_back(result);
        self
    }

    /// Makes `delete` wait for [`ScriptedGateway::release_delete`].
    pub fn hold_deletes(&self) {
        self.hold_deletes.store(true, Ordering::SeqCst);
    }

    pub fn release_delete(&self) {
        self.release.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn unscripted<T>(op: &str) -> Result<T> {
        Err(DirectoryError::Transport(format!("unscripted {}", op)))
    }
}

#[async_trait]
impl RecordGateway for ScriptedGateway {
    async fn list(&self) -> Result<Vec<ClienteRecord>> {
        self.count();
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.lists.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get(&self, id: i64) -> Result<ClienteRecord> {
        self.count();
        Err(DirectoryError::NotFound(id))
    }

    async fn create(&self, _record: &ClienteRecord) -> Result<ClienteRecord> {
        self.count();
        Self::unscripted("create")
    }

    async fn update(&self, _id: i64, _record: &ClienteRecord) -> Result<ClienteRecord> {
        self.count();
        Self::unscripted("update")
    }

    async fn patch(&self, _id: i64, _record: &ClienteRecord) -> Result<ClienteRecord> {
        self.count();
        Self::unscripted("patch")
    }

    async fn delete(&self, _id: i64) -> Result<()> {
        self.count();
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.hold_deletes.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
        let next = self.deletes.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Self::unscripted("delete"))
    }

    async fn search_by_document_type(&self, _tipo: &str) -> Result<Vec<ClienteRecord>> {
        self.count();
        let next = self.searches.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }
}
