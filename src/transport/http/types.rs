use crate::storage::memory::ClienteStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ClienteStore>>,
}

impl AppState {
    pub fn new(store: ClienteStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct DocumentSearchQuery {
    /// Document type to match (`DNI` or `RUC`, case-insensitive).
    #[serde(default)]
    pub tipo: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub clientes: usize,
}

/// Document types the search endpoint accepts.
pub const SEARCHABLE_TIPOS: &[&str] = &["DNI", "RUC"];
