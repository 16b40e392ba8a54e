use crate::{
    breakdown::error::BreakdownErrorKind,
    quota::PlanTier,
    types::RequestId,
};

#[derive(Debug, Clone)]
pub enum BreakdownTelemetryEvent {
    RequestStarted {
        request_id: RequestId,
    },
    ReservationDenied {
        request_id: RequestId,
        tier: PlanTier,
        remaining: u32,
    },
    AssistantCompleted {
        request_id: RequestId,
        steps: usize,
        elapsed_ms: u64,
    },
    AssistantFailed {
        request_id: RequestId,
        kind: BreakdownErrorKind,
        elapsed_ms: u64,
    },
    FallbackGenerated {
        request_id: RequestId,
        steps: usize,
    },
    ReservationReleased {
        request_id: RequestId,
    },
}

pub trait TelemetrySink: Send + Sync {
    fn on_event(&self, event: BreakdownTelemetryEvent);
}

#[derive(Default)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn on_event(&self, _event: BreakdownTelemetryEvent) {}
}
