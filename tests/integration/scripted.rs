//! In-memory transport that replays a fixed script of outcomes

use ark_client::transport::{CompletionTransport, FaultKind, TransportFault};
use ark_client::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub type Outcome = Result<CompletionResponse, TransportFault>;

pub struct ScriptedTransport {
    script: Mutex<VecDeque<Outcome>>,
    fallback: Option<Outcome>,
    calls: AtomicUsize,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Answers every call with `outcome`.
    pub fn always(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(outcome),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionTransport for ScriptedTransport {
    async fn send(&self, request: &CompletionRequest) -> Result<CompletionResponse, TransportFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(outcome) => outcome,
            None => self.fallback.clone().unwrap_or_else(|| {
                Err(TransportFault::new(FaultKind::Other, "script exhausted"))
            }),
        }
    }
}

pub fn status(code: u16) -> Outcome {
    Err(TransportFault::from_status(code, ""))
}

pub fn fault(kind: FaultKind) -> Outcome {
    Err(TransportFault::new(kind, kind.name()))
}

pub fn ok(content: &str) -> Outcome {
    let body = super::mock_server::minimal_success_body(content);
    Ok(serde_json::from_str(&body).unwrap())
}
