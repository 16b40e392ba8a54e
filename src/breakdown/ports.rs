use std::time::Duration;

use async_trait::async_trait;

use crate::breakdown::error::BreakdownError;

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

// Implementations own the wire protocol; the orchestrator bounds the whole
// call with its own timeout regardless.
#[async_trait]
pub trait CompletionPort: Send + Sync {
    async fn generate(&self, request: CompletionRequest) -> Result<String, BreakdownError>;
}
