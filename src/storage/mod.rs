pub mod memory;

pub use memory::ClienteStore;
