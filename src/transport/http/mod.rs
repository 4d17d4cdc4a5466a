//! Reference implementation of the `/api/clientes/` REST surface.

pub mod router;
pub mod types;
pub mod handlers {
    pub mod clientes;
    pub mod common;
    pub mod health;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
