//! In-memory [`ControlApi`] for tests
//!
//! `FakeControlApi` answers from scripted queues, records every call, and can
//! hold calls in flight until a test releases them. Used by this crate's
//! tests and, through the `test-helpers` feature, by downstream crates.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use simcon_core::{
    ActivityPage, ControlResponse, EventType, Health, Metrics, SimulatorState, SimulatorStatus,
};
use tokio::sync::Semaphore;

use crate::api::ControlApi;
use crate::error::ApiError;

/// Operation selector used for scripting and gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Health,
    Status,
    State,
    Metrics,
    GetConfig,
    UpdateConfig,
    Activity,
    Start,
    Stop,
    Reset,
}

/// A recorded call with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum FakeCall {
    Health,
    Status,
    State,
    Metrics,
    GetConfig,
    UpdateConfig(Value),
    Activity {
        limit: u32,
        offset: u32,
        event_type: Option<EventType>,
    },
    Start,
    Stop,
    Reset {
        clear_data: bool,
    },
}

impl FakeCall {
    pub fn op(&self) -> Op {
        match self {
            FakeCall::Health => Op::Health,
            FakeCall::Status => Op::Status,
            FakeCall::State => Op::State,
            FakeCall::Metrics => Op::Metrics,
            FakeCall::GetConfig => Op::GetConfig,
            FakeCall::UpdateConfig(_) => Op::UpdateConfig,
            FakeCall::Activity { .. } => Op::Activity,
            FakeCall::Start => Op::Start,
            FakeCall::Stop => Op::Stop,
            FakeCall::Reset { .. } => Op::Reset,
        }
    }
}

type Scripted = Result<Value, ApiError>;

#[derive(Default)]
struct Inner {
    queued: HashMap<Op, VecDeque<Scripted>>,
    fallback: HashMap<Op, Scripted>,
    calls: Vec<FakeCall>,
    gates: HashMap<Op, Arc<Semaphore>>,
}

/// Scripted, gateable control API double
#[derive(Clone, Default)]
pub struct FakeControlApi {
    inner: Arc<Mutex<Inner>>,
}

impl FakeControlApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a one-shot response for `op`. Queued responses are consumed in
    /// order before the fallback applies.
    pub fn push<T: Serialize>(&self, op: Op, response: Result<T, ApiError>) {
        let scripted = to_scripted(response);
        self.lock().queued.entry(op).or_default().push_back(scripted);
    }

    /// Response returned for `op` whenever its queue is empty.
    pub fn set_fallback<T: Serialize>(&self, op: Op, response: Result<T, ApiError>) {
        let scripted = to_scripted(response);
        self.lock().fallback.insert(op, scripted);
    }

    /// Hold every subsequent call of `op` until [`release`](Self::release).
    pub fn hold(&self, op: Op) {
        self.lock()
            .gates
            .entry(op)
            .or_insert_with(|| Arc::new(Semaphore::new(0)));
    }

    /// Let `count` held calls of `op` proceed.
    pub fn release(&self, op: Op, count: usize) {
        if let Some(gate) = self.lock().gates.get(&op) {
            gate.add_permits(count);
        }
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.lock().calls.clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.lock().calls.iter().filter(|c| c.op() == op).count()
    }

    /// Total number of mutating calls (start, stop, reset, config update)
    pub fn mutation_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| {
                matches!(
                    c.op(),
                    Op::Start | Op::Stop | Op::Reset | Op::UpdateConfig
                )
            })
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panicking test thread must not poison the others.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn answer<T: DeserializeOwned>(&self, call: FakeCall) -> Result<T, ApiError> {
        let op = call.op();
        let gate = {
            let mut inner = self.lock();
            inner.calls.push(call);
            inner.gates.get(&op).cloned()
        };

        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let scripted = {
            let mut inner = self.lock();
            match inner.queued.get_mut(&op).and_then(VecDeque::pop_front) {
                Some(scripted) => scripted,
                None => inner
                    .fallback
                    .get(&op)
                    .cloned()
                    .unwrap_or_else(|| Ok(builtin_default(op))),
            }
        };

        scripted.and_then(|value| {
            serde_json::from_value(value).map_err(|e| ApiError::decode(e.to_string()))
        })
    }
}

fn to_scripted<T: Serialize>(response: Result<T, ApiError>) -> Scripted {
    response.and_then(|v| serde_json::to_value(v).map_err(|e| ApiError::decode(e.to_string())))
}

fn builtin_default(op: Op) -> Value {
    match op {
        Op::Health => json!({"status": "healthy", "uptime_seconds": 0.0, "version": "1.0.0"}),
        Op::Status => json!({"status": "stopped"}),
        Op::State => json!({"status": "stopped"}),
        Op::Metrics => json!({
            "total_points_generated": 0,
            "total_entities": 0,
            "error_count_24h": 0,
            "uptime_seconds": 0.0
        }),
        Op::GetConfig => json!({}),
        Op::Activity => json!({"events": [], "limit": 50, "offset": 0, "count": 0}),
        Op::UpdateConfig => json!({"message": "Configuration updated", "status": "success"}),
        Op::Start => json!({"message": "Simulator started", "status": "success"}),
        Op::Stop => json!({"message": "Simulator stopped", "status": "success"}),
        Op::Reset => json!({"message": "Simulator reset", "status": "success"}),
    }
}

impl ControlApi for FakeControlApi {
    async fn get_health(&self) -> Result<Health, ApiError> {
        self.answer(FakeCall::Health).await
    }

    async fn get_status(&self) -> Result<SimulatorStatus, ApiError> {
        self.answer(FakeCall::Status).await
    }

    async fn get_state(&self) -> Result<SimulatorState, ApiError> {
        self.answer(FakeCall::State).await
    }

    async fn get_metrics(&self) -> Result<Metrics, ApiError> {
        self.answer(FakeCall::Metrics).await
    }

    async fn get_config(&self) -> Result<Value, ApiError> {
        self.answer(FakeCall::GetConfig).await
    }

    async fn update_config(&self, config: Value) -> Result<ControlResponse, ApiError> {
        self.answer(FakeCall::UpdateConfig(config)).await
    }

    async fn get_activity(
        &self,
        limit: u32,
        offset: u32,
        event_type: Option<EventType>,
    ) -> Result<ActivityPage, ApiError> {
        self.answer(FakeCall::Activity {
            limit,
            offset,
            event_type,
        })
        .await
    }

    async fn start_simulator(&self) -> Result<ControlResponse, ApiError> {
        self.answer(FakeCall::Start).await
    }

    async fn stop_simulator(&self) -> Result<ControlResponse, ApiError> {
        self.answer(FakeCall::Stop).await
    }

    async fn reset_simulator(&self, clear_data: bool) -> Result<ControlResponse, ApiError> {
        self.answer(FakeCall::Reset { clear_data }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simcon_core::RunStatus;

    #[tokio::test]
    async fn test_queued_then_fallback_then_default() {
        let api = FakeControlApi::new();
        api.push(Op::Status, Ok(json!({"status": "running"})));
        api.set_fallback::<Value>(Op::Status, Err(ApiError::server(500, "db locked")));

        assert_eq!(api.get_status().await.unwrap().status, RunStatus::Running);
        assert_eq!(
            api.get_status().await.unwrap_err(),
            ApiError::server(500, "db locked")
        );
        assert_eq!(api.get_metrics().await.unwrap(), Metrics::default());
        assert_eq!(api.count(Op::Status), 2);
    }

    #[tokio::test]
    async fn test_hold_and_release() {
        let api = FakeControlApi::new();
        api.hold(Op::Start);

        let task = tokio::spawn({
            let api = api.clone();
            async move { api.start_simulator().await }
        });

        while api.count(Op::Start) == 0 {
            tokio::task::yield_now().await;
        }
        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        api.release(Op::Start, 1);
        let response = task.await.unwrap().unwrap();
        assert_eq!(response.message, "Simulator started");
        assert_eq!(api.mutation_count(), 1);
    }

    #[tokio::test]
    async fn test_records_arguments() {
        let api = FakeControlApi::new();
        api.reset_simulator(true).await.unwrap();
        api.update_config(json!({"a": 1})).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                FakeCall::Reset { clear_data: true },
                FakeCall::UpdateConfig(json!({"a": 1}))
            ]
        );
    }
}
