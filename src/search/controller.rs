//! Search controller: raw input, debounced commits, fetch tickets.
//!
//! The controller never performs I/O. It decides *when* a fetch is needed
//! and hands out a [`FetchTicket`]; the shell runs the fetch and reports back
//! with the ticket's generation so late responses can be recognised.

use super::debouncer::Debouncer;
use std::time::{Duration, Instant};
use tracing::debug;

/// A request to fetch the catalog for a committed query.
///
/// `generation` increases strictly with every ticket issued. Only the outcome
/// carrying the latest generation may update ranked results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonic request number.
    pub generation: u64,
    /// Committed query this fetch serves.
    pub query: String,
    /// Page counter at the time of the commit.
    pub page: u32,
}

/// Result of feeding a keystroke into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    /// Input is blank: the widget must close the dropdown and clear the
    /// selected product right away.
    Reset,
    /// A debounced commit is pending.
    Scheduled,
}

/// Owns `raw_input`, `committed_query` and `page`.
#[derive(Debug, Clone)]
pub struct SearchController {
    raw_input: String,
    committed_query: String,
    page: u32,
    debouncer: Debouncer,
    generation: u64,
}

impl SearchController {
    /// Create a controller with the given debounce delay.
    pub fn new(debounce: Duration) -> Self {
        Self {
            raw_input: String::new(),
            committed_query: String::new(),
            page: 1,
            debouncer: Debouncer::new(debounce),
            generation: 0,
        }
    }

    /// Text currently shown in the input box.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Query that survived debouncing. Empty until the first commit.
    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }

    /// Current page counter, always at least 1.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether a keystroke burst is waiting to be committed.
    pub fn has_pending_commit(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Generation of the most recently issued ticket (0 before any fetch).
    pub fn latest_generation(&self) -> u64 {
        self.generation
    }

    /// Record a keystroke.
    ///
    /// `raw_input` is updated synchronously. Blank input cancels any pending
    /// commit and reports [`InputEffect::Reset`]; anything else (re)schedules
    /// a trailing-edge commit.
    pub fn update_raw_input(&mut self, text: impl Into<String>, now: Instant) -> InputEffect {
        self.raw_input = text.into();

        if self.raw_input.trim().is_empty() {
            self.debouncer.cancel();
            return InputEffect::Reset;
        }

        self.debouncer.schedule(self.raw_input.clone(), now);
        InputEffect::Scheduled
    }

    /// Fire the pending commit if its deadline has passed.
    ///
    /// Returns a ticket only when the debounced value is non-empty and
    /// differs from the committed query. Committing resets the page to 1.
    pub fn poll_commit(&mut self, now: Instant) -> Option<FetchTicket> {
        let debounced = self.debouncer.poll(now)?;
        let candidate = debounced.trim();

        if candidate.is_empty() {
            return None;
        }
        if candidate == self.committed_query {
            debug!(query = candidate, "Debounced query unchanged, no fetch");
            return None;
        }

        self.committed_query = candidate.to_string();
        self.page = 1;
        Some(self.issue_ticket())
    }

    /// Time left before the pending commit fires.
    pub fn time_until_commit(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_ready(now)
    }

    /// Change the page counter.
    ///
    /// Issues a ticket for the current committed query when the page
    /// actually changes and there is something to fetch. Pages below 1 are
    /// clamped to 1.
    pub fn set_page(&mut self, page: u32) -> Option<FetchTicket> {
        let page = page.max(1);
        if page == self.page {
            return None;
        }
        self.page = page;
        if self.committed_query.is_empty() {
            return None;
        }
        Some(self.issue_ticket())
    }

    /// Replace the displayed text without scheduling a commit.
    ///
    /// Used when a selection copies the product title into the input.
    pub fn set_display_text(&mut self, text: impl Into<String>) {
        self.raw_input = text.into();
        self.debouncer.cancel();
    }

    /// Forget everything: raw input, pending commit, committed query, page.
    ///
    /// The generation is bumped so any in-flight response is ignored.
    pub fn clear(&mut self) {
        self.raw_input.clear();
        self.committed_query.clear();
        self.page = 1;
        self.debouncer.cancel();
        self.generation += 1;
    }

    /// Whether an outcome with `generation` belongs to the latest request.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            query: self.committed_query.clone(),
            page: self.page,
        }
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(super::debouncer::DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
