pub mod error;
pub mod memory;
pub mod ports;
pub mod queue;
pub mod reconciler;
pub mod types;

pub use error::{SyncError, SyncErrorKind};
pub use memory::InMemoryCacheStore;
pub use ports::CacheStore;
pub use queue::{PendingBreakdown, PendingRequestQueue};
pub use reconciler::OfflineSyncReconciler;
pub use types::{AppliedEntity, CacheEntry, CachedEntity, Conflict, ReconcileOutput, SyncState};
