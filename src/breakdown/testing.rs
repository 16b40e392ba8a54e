use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::breakdown::{
    error::{BreakdownError, transport},
    ports::{CompletionPort, CompletionRequest},
};

// Replays a scripted reply sequence, repeating the final entry once the
// script runs out. Counts calls so tests can assert a denied request never
// reached the assistant.
pub struct ScriptedCompletionPort {
    replies: Mutex<Vec<Result<String, BreakdownError>>>,
    calls: AtomicUsize,
}

impl ScriptedCompletionPort {
    pub fn new(replies: Vec<Result<String, BreakdownError>>) -> Self {
        let mut replies = replies;
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always_ok(reply: impl Into<String>) -> Self {
        Self::new(vec![Ok(reply.into())])
    }

    pub fn always_failing() -> Self {
        Self::new(vec![Err(transport("scripted transport failure"))])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionPort for ScriptedCompletionPort {
    async fn generate(&self, _request: CompletionRequest) -> Result<String, BreakdownError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut guard = self
            .replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match guard.len() {
            0 => Err(transport("scripted port has no replies")),
            1 => guard[0].clone(),
            _ => guard.pop().unwrap_or_else(|| {
                Err(transport("scripted port has no replies"))
            }),
        }
    }
}

#[derive(Default)]
pub struct HangingCompletionPort;

#[async_trait]
impl CompletionPort for HangingCompletionPort {
    async fn generate(&self, _request: CompletionRequest) -> Result<String, BreakdownError> {
        std::future::pending::<()>().await;
        unreachable!("pending future never resolves")
    }
}
