pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::directory::{ActiveFilter, DirectoryManager, DirectoryView, Presentation, Status};
pub use app::gateway::{HttpGateway, RecordGateway};
pub use app::mutation::MutationCoordinator;
pub use domain::{ClienteRecord, NavEvent, Navigation, Screen, SearchStrategy, TipoDocumento};
pub use error::{DirectoryError, ErrorKind, Result};
pub use infra::config::ClientConfig;
pub use storage::memory::ClienteStore;
