//! Directory State Manager: owns the record collection and its view state.
//!
//! State is held behind a mutex that is never kept across an `.await`; each
//! network call is issued unlocked and its result applied in one locked step.
//! Overlapping loads therefore resolve last-write-wins: whichever settles last
//! decides `canonical`, `view` and `status`.
//!
//! Every state change publishes a fresh [`DirectoryView`] on a watch channel,
//! which is the only thing a presentation layer needs to read.

use crate::app::gateway::{HttpGateway, RecordGateway};
use crate::app::mutation::MutationCoordinator;
use crate::domain::cliente::{ClienteRecord, TipoDocumento};
use crate::domain::search::{local_filter, SearchStrategy};
use crate::error::{DirectoryError, Result};
use crate::infra::config::ClientConfig;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready,
    Error(String),
}

/// What produced the current view when it differs from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFilter {
    Local {
        strategy: SearchStrategy,
        query: String,
    },
    Remote {
        tipo: String,
    },
}

/// Which of the mutually exclusive list states a front end should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Loading,
    Error(String),
    Empty,
    Records,
}

#[derive(Debug)]
struct DirectoryState {
    canonical: Vec<ClienteRecord>,
    /// Restore point for cleared searches; only a successful full fetch replaces it.
    snapshot: Vec<ClienteRecord>,
    view: Vec<ClienteRecord>,
    status: Status,
    /// Ids with a delete in flight. At most one mutation per id.
    pending: BTreeSet<i64>,
    searching: bool,
    filter: Option<ActiveFilter>,
    loaded_at: Option<DateTime<Utc>>,
    /// Highest refresh revision already honoured.
    revision: u64,
}

impl DirectoryState {
    fn new() -> Self {
        Self {
            canonical: Vec::new(),
            snapshot: Vec::new(),
            view: Vec::new(),
            status: Status::Loading,
            pending: BTreeSet::new(),
            searching: false,
            filter: None,
            loaded_at: None,
            revision: 0,
        }
    }

    fn project(&self) -> DirectoryView {
        DirectoryView {
            records: self.view.clone(),
            status: self.status.clone(),
            total: self.canonical.len(),
            dni_count: count_tipo(&self.view, &TipoDocumento::Dni),
            ruc_count: count_tipo(&self.view, &TipoDocumento::Ruc),
            pending: self.pending.iter().copied().collect(),
            searching: self.searching,
            filter: self.filter.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

fn count_tipo(records: &[ClienteRecord], tipo: &TipoDocumento) -> usize {
    records.iter().filter(|r| &r.tipo_documento == tipo).count()
}

/// Read-only projection of the directory, recomputed on every state change.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryView {
    /// The records currently presented (filtered or not).
    pub records: Vec<ClienteRecord>,
    pub status: Status,
    /// Size of the canonical collection, unaffected by filters.
    pub total: usize,
    /// DNI holders among `records`.
    pub dni_count: usize,
    /// RUC holders among `records`.
    pub ruc_count: usize,
    pub pending: Vec<i64>,
    pub searching: bool,
    pub filter: Option<ActiveFilter>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl DirectoryView {
    /// Loading beats error, error beats empty.
    pub fn presentation(&self) -> Presentation {
        match &self.status {
            Status::Loading => Presentation::Loading,
            Status::Error(message) => Presentation::Error(message.clone()),
            Status::Ready if self.records.is_empty() => Presentation::Empty,
            Status::Ready => Presentation::Records,
        }
    }

    pub fn is_pending(&self, id: i64) -> bool {
        self.pending.contains(&id)
    }
}

/// Top-level owner of directory state; the presentation layer's only entry point.
pub struct DirectoryManager {
    mutations: MutationCoordinator,
    gateway: Arc<dyn RecordGateway>,
    state: Mutex<DirectoryState>,
    updates: watch::Sender<DirectoryView>,
}

impl DirectoryManager {
    /// Starts empty with status `Loading`; call [`DirectoryManager::load`] to populate.
    pub fn new(gateway: Arc<dyn RecordGateway>) -> Self {
        let state = DirectoryState::new();
        let (updates, _) = watch::channel(state.project());
        Self {
            mutations: MutationCoordinator::new(gateway.clone()),
            gateway,
            state: Mutex::new(state),
            updates,
        }
    }

    /// Builds a manager over [`HttpGateway`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let gateway = HttpGateway::new(config)?;
        Ok(Self::new(Arc::new(gateway)))
    }

    pub fn subscribe(&self) -> watch::Receiver<DirectoryView> {
        self.updates.subscribe()
    }

    /// Current projection.
    pub fn view(&self) -> DirectoryView {
        self.lock().project()
    }

    pub fn status(&self) -> Status {
        self.lock().status.clone()
    }

    pub fn records(&self) -> Vec<ClienteRecord> {
        self.lock().view.clone()
    }

    /// The unfiltered collection as of the last successful fetch.
    pub fn snapshot(&self) -> Vec<ClienteRecord> {
        self.lock().snapshot.clone()
    }

    pub fn canonical(&self) -> Vec<ClienteRecord> {
        self.lock().canonical.clone()
    }

    fn lock(&self) -> MutexGuard<'_, DirectoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `change` under the lock and publishes the resulting projection.
    fn apply<R>(&self, change: impl FnOnce(&mut DirectoryState) -> R) -> R {
        let mut state = self.lock();
        let out = change(&mut *state);
        self.updates.send_replace(state.project());
        out
    }

    /// Full fetch. On success `canonical`, `snapshot` and `view` are replaced
    /// together and any filter is dropped; on failure they are left as they were.
    pub async fn load(&self) -> Result<()> {
        self.apply(|s| s.status = Status::Loading);

        match self.gateway.list().await {
            Ok(records) => {
                let count = records.len();
                self.apply(|s| {
                    s.canonical = records.clone();
                    s.snapshot = records.clone();
                    s.view = records;
                    s.filter = None;
                    s.status = Status::Ready;
                    s.loaded_at = Some(Utc::now());
                });
                tracing::info!(count, "clientes loaded");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, kind = %err.kind(), "clientes load failed");
                self.apply(|s| s.status = Status::Error(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn reload(&self) -> Result<()> {
        self.load().await
    }

    /// Reloads when `revision` is newer than the last one seen; returns whether it did.
    ///
    /// A revision only counts as seen once its reload succeeds, so a failed
    /// refresh can be retried with the same revision.
    pub async fn refresh(&self, revision: u64) -> Result<bool> {
        let seen = self.lock().revision;
        if revision <= seen {
            return Ok(false);
        }
        self.reload().await?;
        let mut state = self.lock();
        state.revision = state.revision.max(revision);
        Ok(true)
    }

    /// Narrows the view to snapshot records matching `query`. A blank query
    /// restores the snapshot. Returns the number of records now in view.
    pub fn search_local(&self, query: &str, strategy: SearchStrategy) -> usize {
        self.apply(|s| {
            s.view = local_filter(&s.snapshot, query, strategy);
            s.filter = if query.trim().is_empty() {
                None
            } else {
                Some(ActiveFilter::Local {
                    strategy,
                    query: query.trim().to_string(),
                })
            };
            s.view.len()
        })
    }

    /// Replaces the view with the server's records for `tipo`. The snapshot is
    /// kept, so [`DirectoryManager::clear_search`] still restores the full list.
    pub async fn search_remote(&self, tipo: &str) -> Result<usize> {
        let tipo = tipo.trim().to_uppercase();
        self.apply(|s| s.searching = true);

        match self.gateway.search_by_document_type(&tipo).await {
            Ok(records) => {
                let count = records.len();
                self.apply(|s| {
                    s.view = records;
                    s.filter = Some(ActiveFilter::Remote { tipo: tipo.clone() });
                    s.searching = false;
                    s.status = Status::Ready;
                });
                tracing::info!(tipo = %tipo, count, "remote search completed");
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(tipo = %tipo, error = %err, "remote search failed");
                self.apply(|s| {
                    s.searching = false;
                    s.status = Status::Error(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// "Show all": the view goes back to the snapshot whatever produced it.
    pub fn clear_search(&self) {
        self.apply(|s| {
            s.view = s.snapshot.clone();
            s.filter = None;
        });
    }

    /// Deletes a persisted record, then reloads the collection.
    ///
    /// Fails with `InvalidArgument`, without any network call, when the record
    /// has no id or a delete for the same id is already in flight. On a failed
    /// delete the collection is untouched and the error is surfaced through
    /// `status`. A failed follow-up reload is reported through `status` only;
    /// the delete itself has already succeeded.
    pub async fn delete_record(&self, record: &ClienteRecord) -> Result<()> {
        let id = MutationCoordinator::persisted_id(record)?;
        let claimed = self.apply(|s| s.pending.insert(id));
        if !claimed {
            return Err(DirectoryError::InvalidArgument(format!(
                "ya hay una eliminación en curso para el cliente {}",
                id
            )));
        }

        let outcome = self.mutations.delete(id).await;
        match outcome {
            Ok(()) => {
                self.apply(|s| {
                    s.pending.remove(&id);
                });
                if let Err(err) = self.reload().await {
                    tracing::warn!(id, error = %err, "reload after delete failed");
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "delete failed");
                self.apply(|s| {
                    s.pending.remove(&id);
                    s.status = Status::Error(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Validates and creates. The result is not merged locally; reload to see it.
    pub async fn create_record(&self, record: &ClienteRecord) -> Result<ClienteRecord> {
        self.mutations.create(record).await
    }

    /// Validates and fully replaces record `id`. Not merged locally.
    pub async fn update_record(&self, id: i64, record: &ClienteRecord) -> Result<ClienteRecord> {
        self.mutations.update(id, record).await
    }

    pub async fn patch_record(&self, id: i64, record: &ClienteRecord) -> Result<ClienteRecord> {
        self.mutations.patch(id, record).await
    }

    /// Fresh copy of one record from the service; directory state is untouched.
    pub async fn fetch_record(&self, id: i64) -> Result<ClienteRecord> {
        self.gateway.get(id).await
    }
}
