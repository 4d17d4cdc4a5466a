//! Domain types: the cliente record, response envelopes, local search and screen state.

pub mod cliente;
pub mod envelope;
pub mod navigation;
pub mod search;

pub use cliente::{ClienteRecord, TipoDocumento};
pub use envelope::{ClienteListResponse, ClienteResponse};
pub use navigation::{NavEvent, Navigation, Screen};
pub use search::{local_filter, SearchStrategy};
