pub mod error;
pub mod manager;
pub mod memory;
pub mod ports;
pub mod types;

pub use error::{QuotaError, QuotaErrorKind};
pub use manager::QuotaManager;
pub use memory::InMemoryQuotaStore;
pub use ports::{QuotaStore, StoreReservation};
pub use types::{PlanTier, QuotaPhase, QuotaRecord, ReservationOutcome, advance_one_billing_month};
