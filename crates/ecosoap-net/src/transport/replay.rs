use std::collections::VecDeque;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::Value;

use super::{Transport, TransportResponse};
use crate::error::{NetworkError, Result};
use crate::http::HttpRequest;

type Outcome = Result<TransportResponse>;

#[derive(Default)]
struct ReplayState {
    queue: VecDeque<Outcome>,
    fallback: Option<Outcome>,
    requests: Vec<HttpRequest>,
}

/// Deterministic transport that replays recorded outcomes.
///
/// Outcomes are served in the order they were queued. Once the queue is
/// drained the fixture answers with the outcome given to [`repeat`], or
/// fails with [`NetworkError::Request`] if there is none. Every request is
/// recorded before it is answered, so tests can inspect exactly what was put
/// on the wire. Clones share state.
///
/// [`repeat`]: ReplayTransport::repeat
#[derive(Clone, Default)]
pub struct ReplayTransport {
    state: Arc<Mutex<ReplayState>>,
}

impl ReplayTransport {
    /// Create a fixture with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with `body` serialized as JSON.
    pub fn respond_with_json(self, body: Value) -> Self {
        self.push(Ok(TransportResponse::ok(body.to_string())))
    }

    /// Queue a response with the given status and raw body.
    pub fn respond_with_bytes(self, status: u16, body: impl Into<Bytes>) -> Self {
        self.push(Ok(TransportResponse::new(status, body)))
    }

    /// Queue a transport failure.
    pub fn fail_with(self, error: NetworkError) -> Self {
        self.push(Err(error))
    }

    /// Answer every call past the end of the queue with `outcome`.
    pub fn repeat(self, outcome: Result<TransportResponse>) -> Self {
        self.state.lock().fallback = Some(outcome);
        self
    }

    fn push(self, outcome: Outcome) -> Self {
        self.state.lock().queue.push_back(outcome);
        self
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().requests.clone()
    }

    /// The bodies of all received requests, parsed as JSON.
    ///
    /// Bodies that are not valid JSON come back as `Value::Null`.
    pub fn recorded_bodies(&self) -> Vec<Value> {
        self.state
            .lock()
            .requests
            .iter()
            .map(|request| serde_json::from_slice(&request.body.as_bytes()).unwrap_or(Value::Null))
            .collect()
    }

    /// Number of queued outcomes not yet served.
    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }
}

impl Transport for ReplayTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<TransportResponse>> {
        let outcome = {
            let mut state = self.state.lock();
            state.requests.push(request);
            state
                .queue
                .pop_front()
                .or_else(|| state.fallback.clone())
                .unwrap_or_else(|| Err(NetworkError::Request("no recorded response".into())))
        };
        Box::pin(async move { outcome })
    }
}

impl std::fmt::Debug for ReplayTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ReplayTransport")
            .field("pending", &state.queue.len())
            .field("calls", &state.requests.len())
            .finish()
    }
}
