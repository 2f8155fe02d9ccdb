//! Single-flight transaction cache for generation tasks.
//!
//! The executor itself is a pure function; at-most-once execution per
//! declaration is this layer's job. [`TransactionCache`] tracks a per-key
//! lifecycle of `unrequested -> running -> completed(cached)`:
//!
//! - the first caller for a [`DeclarationId`] inserts a `Running` marker and
//!   computes;
//! - concurrent callers for the same key find the marker and wait on its
//!   [`tokio::sync::Notify`], then pick up the shared `Arc` result;
//! - once `Completed`, every later caller gets the cached `Arc` without any
//!   executor invocation.
//!
//! Failed executions are *not* cached: the state entry is removed and waiters
//! are woken, so the next caller recomputes. Retry policy beyond that belongs
//! to callers. The error returned to the computing caller carries context
//! attributing the failure to the originating declaration.
//!
//! The state map uses `DashMap` for lock-free concurrent access; no lock is
//! held across an await point.

use anyhow::{Context, Result};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::PENDING_TRANSACTION_TIMEOUT;
use crate::engine::{ParcelAnalysis, ParcelGeneration};
use crate::executor::{GenerationTaskExecutor, LazyRef, ResultMap};
use crate::metadata::{DeclarationId, SourceDeclaration};

/// Per-key execution state.
#[derive(Debug, Clone)]
enum TransactionState {
    /// Another caller is currently executing this declaration's task.
    ///
    /// Carries the notification handle waiters subscribe to. The computing
    /// caller triggers it on completion, success or failure.
    Running(Arc<tokio::sync::Notify>),

    /// Execution completed; the shared result is served to every caller.
    Completed(Arc<ResultMap>),
}

/// Memoizing single-flight wrapper around a [`GenerationTaskExecutor`].
#[derive(Debug)]
pub struct TransactionCache<A, G> {
    executor: GenerationTaskExecutor<A, G>,
    states: DashMap<DeclarationId, TransactionState>,
    pending_timeout: Duration,
}

impl<A: ParcelAnalysis, G: ParcelGeneration> TransactionCache<A, G> {
    /// Wrap an executor in a fresh, empty cache with the default
    /// [`PENDING_TRANSACTION_TIMEOUT`] for waiters.
    pub fn new(executor: GenerationTaskExecutor<A, G>) -> Self {
        Self::with_timeout(executor, PENDING_TRANSACTION_TIMEOUT)
    }

    /// Wrap an executor with a custom pending-wait timeout.
    pub fn with_timeout(executor: GenerationTaskExecutor<A, G>, pending_timeout: Duration) -> Self {
        Self {
            executor,
            states: DashMap::new(),
            pending_timeout,
        }
    }

    /// The cached result for `id`, if its execution already completed.
    pub fn cached(&self, id: &DeclarationId) -> Option<Arc<ResultMap>> {
        self.states.get(id).and_then(|state| match state.value() {
            TransactionState::Completed(result) => Some(result.clone()),
            TransactionState::Running(_) => None,
        })
    }

    /// Execute the generation task for `id`, or join an in-flight execution,
    /// or serve the cached result.
    ///
    /// The `declaration` reference is only evaluated if this caller ends up
    /// computing; a caller that joins a running execution or hits the cache
    /// drops it unevaluated.
    ///
    /// # Errors
    ///
    /// Propagates executor failure with context naming the declaration. The
    /// failed key returns to the unrequested state.
    pub async fn run(
        &self,
        id: DeclarationId,
        declaration: LazyRef<SourceDeclaration>,
    ) -> Result<Arc<ResultMap>> {
        let notify = Arc::new(tokio::sync::Notify::new());

        loop {
            match self.states.entry(id.clone()) {
                dashmap::mapref::entry::Entry::Occupied(entry) => match entry.get() {
                    TransactionState::Completed(result) => {
                        let result = result.clone();
                        drop(entry);
                        debug!(
                            target: "transaction",
                            "Serving cached parcel results for '{id}'"
                        );
                        return Ok(result);
                    }
                    TransactionState::Running(existing) => {
                        let existing = existing.clone();
                        // Create the notified future BEFORE dropping the entry:
                        // Notify only wakes futures that are already waiting, so
                        // a completion landing between drop() and notified()
                        // must not be missed.
                        let notified = existing.notified();
                        drop(entry);

                        debug!(
                            target: "transaction",
                            "Waiting for in-flight execution of '{id}'"
                        );

                        tokio::select! {
                            _ = notified => {
                                // Execution finished (success or failure); retry
                                // from the top to observe the new state.
                                continue;
                            }
                            _ = tokio::time::sleep(self.pending_timeout) => {
                                // The computing caller may have hung. Proceed to
                                // compute without replacing its Running entry;
                                // overwriting it would orphan the waiters on the
                                // old notify handle.
                                warn!(
                                    target: "transaction",
                                    "Timed out waiting for execution of '{id}' - proceeding anyway"
                                );
                                break;
                            }
                        }
                    }
                },
                dashmap::mapref::entry::Entry::Vacant(entry) => {
                    entry.insert(TransactionState::Running(notify.clone()));
                    break;
                }
            }
        }

        debug!(target: "transaction", "Executing generation task for '{id}'");

        let result = self
            .executor
            .execute(declaration)
            .with_context(|| format!("parcel generation failed for declaration '{id}'"));

        match result {
            Ok(map) => {
                let map = Arc::new(map);
                self.states.insert(id, TransactionState::Completed(map.clone()));
                notify.notify_waiters();
                Ok(map)
            }
            Err(err) => {
                self.states.remove(&id);
                notify.notify_waiters();
                Err(err)
            }
        }
    }
}
