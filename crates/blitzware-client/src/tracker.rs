//! Per-request lifecycle tracking.
//!
//! Every call made through [`crate::ApiClient`] gets a [`RequestId`] and a
//! record that walks `Pending -> Sent -> Success | Error`. Records are kept
//! per id, so overlapping calls never overwrite each other's outcome. The
//! most recently started call is additionally published on a watch channel
//! for front-ends that only care about "the current request".

use std::collections::VecDeque;
use std::fmt;

use blitzware_core::{ErrorBody, RequestState};
use tokio::sync::{watch, RwLock};
use tracing::debug;

use crate::error::ClientError;

/// Identifier of one tracked call. Ids increase monotonically per tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub id: RequestId,
    /// `METHOD /path`
    pub label: String,
    pub state: RequestState,
    pub error: Option<ErrorBody>,
}

struct TrackerInner {
    next_id: u64,
    records: VecDeque<RequestRecord>,
    latest: Option<RequestId>,
}

impl TrackerInner {
    fn find_mut(&mut self, id: RequestId) -> Option<&mut RequestRecord> {
        self.records.iter_mut().rev().find(|r| r.id == id)
    }
}

/// Bounded history of request records.
pub struct RequestTracker {
    inner: RwLock<TrackerInner>,
    latest_tx: watch::Sender<Option<RequestRecord>>,
    capacity: usize,
}

impl RequestTracker {
    /// Tracker remembering up to `capacity` calls (at least one).
    pub fn new(capacity: usize) -> Self {
        let (latest_tx, _) = watch::channel(None);
        Self {
            inner: RwLock::new(TrackerInner {
                next_id: 1,
                records: VecDeque::new(),
                latest: None,
            }),
            latest_tx,
            capacity: capacity.max(1),
        }
    }

    /// Register a new call in state `Pending`.
    pub async fn begin(&self, label: impl Into<String>) -> RequestId {
        let mut inner = self.inner.write().await;
        let id = RequestId(inner.next_id);
        inner.next_id += 1;

        let record = RequestRecord {
            id,
            label: label.into(),
            state: RequestState::Pending,
            error: None,
        };
        debug!(request = %id, label = %record.label, "request pending");
        inner.records.push_back(record.clone());
        while inner.records.len() > self.capacity {
            inner.records.pop_front();
        }
        inner.latest = Some(id);
        self.latest_tx.send_replace(Some(record));
        id
    }

    /// The transport returned; the body has not been decoded yet.
    pub async fn mark_sent(&self, id: RequestId) {
        self.transition(id, RequestState::Sent, None).await;
    }

    /// Record the terminal state from the call's outcome.
    pub async fn finish(&self, id: RequestId, error: Option<&ClientError>) {
        match error {
            None => self.transition(id, RequestState::Success, None).await,
            Some(e) => {
                self.transition(id, RequestState::Error, Some(e.to_body()))
                    .await;
            }
        }
    }

    async fn transition(&self, id: RequestId, state: RequestState, error: Option<ErrorBody>) {
        let mut inner = self.inner.write().await;
        let is_latest = inner.latest == Some(id);
        let Some(record) = inner.find_mut(id) else {
            // Evicted before it finished; nothing left to update.
            return;
        };
        debug_assert!(record.state.can_transition_to(state));
        record.state = state;
        record.error = error;
        debug!(request = %id, %state, "request state");
        if is_latest {
            let snapshot = record.clone();
            self.latest_tx.send_replace(Some(snapshot));
        }
    }

    pub async fn get(&self, id: RequestId) -> Option<RequestRecord> {
        let inner = self.inner.read().await;
        inner.records.iter().rev().find(|r| r.id == id).cloned()
    }

    /// State of `id`; `None` when unknown or evicted.
    pub async fn state(&self, id: RequestId) -> RequestState {
        self.get(id).await.map_or(RequestState::None, |r| r.state)
    }

    /// Record of the most recently started call.
    pub fn latest(&self) -> Option<RequestRecord> {
        self.latest_tx.borrow().clone()
    }

    /// State of the most recently started call.
    pub fn latest_state(&self) -> RequestState {
        self.latest_tx
            .borrow()
            .as_ref()
            .map_or(RequestState::None, |r| r.state)
    }

    /// Watch the most recently started call.
    pub fn subscribe(&self) -> watch::Receiver<Option<RequestRecord>> {
        self.latest_tx.subscribe()
    }

    /// All remembered records, oldest first.
    pub async fn history(&self) -> Vec<RequestRecord> {
        self.inner.read().await.records.iter().cloned().collect()
    }
}

impl fmt::Debug for RequestTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestTracker")
            .field("capacity", &self.capacity)
            .field("latest", &self.latest())
            .finish_non_exhaustive()
    }
}
