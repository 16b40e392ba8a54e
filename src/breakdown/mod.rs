pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod parse;
pub mod ports;
pub mod prompt;
pub mod telemetry;
pub mod testing;
pub mod types;

pub use error::{BreakdownError, BreakdownErrorKind};
pub use orchestrator::BreakdownOrchestrator;
pub use ports::{CompletionPort, CompletionRequest};
pub use telemetry::{BreakdownTelemetryEvent, NoopTelemetrySink, TelemetrySink};
pub use types::{BreakdownConfig, BreakdownDenial, BreakdownOutcome};
