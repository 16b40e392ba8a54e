pub mod error;
pub mod memory;
pub mod ports;

pub use error::{StoreError, StoreErrorKind};
pub use memory::InMemoryStore;
pub use ports::{CheckinStore, TaskStore};
