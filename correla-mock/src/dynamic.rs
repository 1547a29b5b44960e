use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use correla_core::{
    CorrelaError, HistoryRequest, HistoryResponse, Instrument, PriceHistorySource, Symbol,
};

use crate::restrict_to_period;

/// Instruction for how a call should behave.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(CorrelaError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

/// One recorded `history` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCall {
    /// Symbol the call was made for.
    pub symbol: String,
    /// Requested period, if the request carried one.
    pub period: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

#[derive(Default)]
struct InternalState {
    queued: HashMap<Symbol, VecDeque<MockBehavior<HistoryResponse>>>,
    sticky: HashMap<Symbol, MockBehavior<HistoryResponse>>,
    calls: Vec<HistoryCall>,
}

/// Controller handle used by tests to script the source from the outside.
pub struct ScriptedController {
    state: Arc<Mutex<InternalState>>,
}

impl ScriptedController {
    /// Set the behavior used for `symbol` whenever no queued behavior is pending.
    pub async fn set_history_behavior(
        &self,
        symbol: Symbol,
        behavior: MockBehavior<HistoryResponse>,
    ) {
        let mut guard = self.state.lock().await;
        guard.sticky.insert(symbol, behavior);
    }

    /// Queue a one-shot behavior for the next call on `symbol`.
    ///
    /// Queued behaviors are consumed in order before the sticky one applies.
    pub async fn push_history_behavior(
        &self,
        symbol: Symbol,
        behavior: MockBehavior<HistoryResponse>,
    ) {
        let mut guard = self.state.lock().await;
        guard.queued.entry(symbol).or_default().push_back(behavior);
    }

    /// Copy of every call made so far, in arrival order.
    pub async fn calls(&self) -> Vec<HistoryCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of calls made so far.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.queued.clear();
        guard.sticky.clear();
        guard.calls.clear();
    }
}

/// A price source that defers all behavior to an external controller.
///
/// Returned histories are restricted to the requested period, so one scripted
/// response serves both span and per-date requests.
pub struct ScriptedPriceSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl ScriptedPriceSource {
    /// Create a new scripted source and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn PriceHistorySource>, ScriptedController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = ScriptedController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn PriceHistorySource>, controller)
    }
}

#[async_trait]
impl PriceHistorySource for ScriptedPriceSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "ScriptedMock"
    }

    async fn history(
        &self,
        instrument: &Instrument,
        req: HistoryRequest,
    ) -> Result<HistoryResponse, CorrelaError> {
        let symbol = instrument.symbol();
        // Record and pick a behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(HistoryCall {
                symbol: symbol.to_string(),
                period: req.period(),
            });
            let queued = guard.queued.get_mut(symbol).and_then(VecDeque::pop_front);
            queued.or_else(|| guard.sticky.get(symbol).cloned())
        };

        match behavior {
            Some(MockBehavior::Return(resp)) => Ok(restrict_to_period(resp, &req)),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(CorrelaError::unsupported("history")),
        }
    }
}
