//! Background fetch dispatch.
//!
//! Each ticket is served either from the cache or by a short-lived worker
//! thread. Outcomes come back through an mpsc channel that the event loop
//! drains without blocking. Workers never touch UI state; the generation on
//! the ticket lets the receiver drop outcomes that arrive too late.

use super::cache::CatalogCache;
use super::client::{CatalogClient, CatalogRequest};
use crate::model::{FetchError, Product};
use crate::search::FetchTicket;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Result of one dispatched ticket.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Ticket this outcome answers.
    pub ticket: FetchTicket,
    /// Products on success, shared so the cache and the UI hold one copy.
    pub result: Result<Arc<Vec<Product>>, FetchError>,
    /// Whether the products came from the cache.
    pub from_cache: bool,
}

/// Dispatches fetch tickets and collects their outcomes.
pub struct FetchPool {
    client: Arc<dyn CatalogClient>,
    cache: CatalogCache,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    in_flight: usize,
}

impl FetchPool {
    /// Create a pool around a catalog client and cache.
    pub fn new(client: Arc<dyn CatalogClient>, cache: CatalogCache) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            cache,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Number of dispatched tickets that have not been drained yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start serving `ticket`.
    ///
    /// A fresh cache entry answers immediately (the outcome is queued for
    /// the next drain); otherwise a worker thread performs the request.
    pub fn dispatch(&mut self, ticket: FetchTicket, now: Instant) {
        let request = CatalogRequest {
            query: ticket.query.clone(),
            page: ticket.page,
        };
        self.in_flight += 1;

        if let Some(products) = self.cache.get_fresh(&request, now) {
            debug!(generation = ticket.generation, query = %ticket.query, "Serving catalog from cache");
            let _ = self.tx.send(FetchOutcome {
                ticket,
                result: Ok(products),
                from_cache: true,
            });
            return;
        }

        debug!(generation = ticket.generation, query = %ticket.query, "Dispatching catalog fetch");
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let fallback_tx = self.tx.clone();
        let fallback_ticket = ticket.clone();

        let spawned = thread::Builder::new()
            .name("catalog-fetch".to_string())
            .spawn(move || {
                let result = client.fetch(&request).map(Arc::new);
                // Receiver gone means the app is shutting down
                let _ = tx.send(FetchOutcome {
                    ticket,
                    result,
                    from_cache: false,
                });
            });

        if let Err(err) = spawned {
            warn!(error = %err, "Failed to spawn fetch worker");
            let _ = fallback_tx.send(FetchOutcome {
                ticket: fallback_ticket,
                result: Err(FetchError::Disconnected),
                from_cache: false,
            });
        }
    }

    /// Collect every outcome that is ready, without blocking.
    pub fn drain(&mut self, now: Instant) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            outcomes.push(self.record(outcome, now));
        }
        outcomes
    }

    /// Wait up to `timeout` for at least one outcome, then drain the rest.
    ///
    /// Returns an empty vector on timeout.
    pub fn drain_blocking(&mut self, timeout: Duration) -> Vec<FetchOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(first) => {
                let now = Instant::now();
                let mut outcomes = vec![self.record(first, now)];
                outcomes.extend(self.drain(now));
                outcomes
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => Vec::new(),
        }
    }

    fn record(&mut self, outcome: FetchOutcome, now: Instant) -> FetchOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        if !outcome.from_cache {
            if let Ok(products) = &outcome.result {
                let request = CatalogRequest {
                    query: outcome.ticket.query.clone(),
                    page: outcome.ticket.page,
                };
                self.cache.insert(request, Arc::clone(products), now);
            }
        }
        outcome
    }
}

impl std::fmt::Debug for FetchPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchPool")
            .field("cache", &self.cache)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
