use shared::PredictionResult;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned behaviour for tests. Unset fields fall back to the deterministic stub.
#[derive(Debug, Clone, Default)]
pub struct StubScript {
    pub prediction: Option<PredictionResult>,
    pub predict_status: Option<u16>,
    /// Only the first `n` predict calls get `predict_status`; `None` means all of them.
    pub predict_status_limit: Option<usize>,
    /// Sent verbatim as the `/predict` body, for malformed-response cases.
    pub predict_body: Option<String>,
    pub advice_text: Option<String>,
    pub advice_status: Option<u16>,
}

#[derive(Debug, Default)]
pub struct StubState {
    pub script: StubScript,
    predict_calls: AtomicUsize,
    advice_calls: AtomicUsize,
}

impl StubState {
    pub fn new(script: StubScript) -> Self {
        Self {
            script,
            predict_calls: AtomicUsize::new(0),
            advice_calls: AtomicUsize::new(0),
        }
    }

    pub fn record_predict(&self) -> usize {
        self.predict_calls.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn record_advice(&self) -> usize {
        self.advice_calls.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn predict_calls(&self) -> usize {
        self.predict_calls.load(Ordering::SeqCst)
    }

    pub fn advice_calls(&self) -> usize {
        self.advice_calls.load(Ordering::SeqCst)
    }
}
