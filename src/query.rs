//! Query generations.
//!
//! Every fetch takes a ticket before it starts. A response is only applied
//! if its ticket is still the newest one, so a slow response for an old
//! keyword can never overwrite the result of a newer search.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct QueryGeneration {
    latest: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct QueryTicket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl QueryGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> QueryTicket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        QueryTicket {
            id,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Supersedes any ticket in flight without starting a new query.
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// Runs `fut` under a fresh ticket; `None` means a newer query started meanwhile.
    pub async fn run<F, T>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.begin();
        let out = fut.await;
        ticket.accept(out)
    }
}

impl QueryTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }

    pub fn accept<T>(&self, value: T) -> Option<T> {
        if self.is_current() {
            Some(value)
        } else {
            debug!(ticket = self.id, "discarding stale response");
            None
        }
    }
}
