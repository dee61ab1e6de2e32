//! Application state and transitions.
//!
//! AppState is the root state type of the widget. It wires the search
//! controller, the ranker and the selection state machine together. Every
//! transition is a plain method with no I/O; fetch work leaves this module
//! as a [`FetchTicket`] and comes back as a [`FetchOutcome`].

use crate::catalog::FetchOutcome;
use crate::model::Product;
use crate::search::{rank_owned, FetchTicket, InputEffect, SearchController};
use crate::state::input_handler::InputBuffer;
use crate::state::selection::{NavPolicy, SelectionState};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

// ===== FetchStatus =====

/// Status of the latest fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A ticket was issued and its outcome has not arrived.
    Loading,
    /// The latest fetch failed.
    Failed(String),
    /// The latest fetch succeeded.
    Loaded,
}

// ===== FocusPane =====

/// Which part of the widget has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// The search input.
    #[default]
    Input,
    /// The product detail card.
    Details,
}

// ===== ResultsView =====

/// What the dropdown body shows, in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultsView<'a> {
    /// Spinner.
    Loading,
    /// Fetch failed.
    Error(&'a str),
    /// Fetch succeeded with no matches.
    Empty,
    /// Ranked matches.
    Populated(&'a [Product]),
}

// ===== AppState =====

/// Root widget state. Pure data, no side effects.
///
/// # Data flow
///
/// keystroke → [`SearchController`] (debounce) → [`FetchTicket`] → fetch
/// pool → [`FetchOutcome`] → stale check → ranker → selection revalidation.
///
/// # Invariant
///
/// `ranked` is always `rank(catalog, committed_query)`, and the highlighted
/// row is re-checked against its length whenever it is recomputed.
#[derive(Debug, Clone)]
pub struct AppState {
    controller: SearchController,
    input: InputBuffer,
    selection: SelectionState,

    /// Last catalog accepted from a current fetch.
    catalog: Option<Arc<Vec<Product>>>,

    /// Ranked matches for the committed query.
    ranked: Vec<Product>,

    status: FetchStatus,

    /// Wall-clock time of the last accepted fetch, for the status bar.
    last_fetched_at: Option<DateTime<Local>>,

    /// Arrow-key behavior at the ends of the list.
    pub nav_policy: NavPolicy,

    /// Which pane has keyboard focus.
    pub focus: FocusPane,

    /// Whether the help overlay is visible.
    pub help_visible: bool,
}

impl AppState {
    /// Create state with the given debounce delay and navigation policy.
    pub fn new(debounce: Duration, nav_policy: NavPolicy) -> Self {
        Self {
            controller: SearchController::new(debounce),
            input: InputBuffer::default(),
            selection: SelectionState::new(),
            catalog: None,
            ranked: Vec::new(),
            status: FetchStatus::Idle,
            last_fetched_at: None,
            nav_policy,
            focus: FocusPane::Input,
            help_visible: false,
        }
    }

    // ----- Accessors -----

    /// Search box contents.
    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// Debounce and query bookkeeping.
    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    /// Dropdown and selected product.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Outcome of the latest fetch.
    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    /// Ranked matches for the committed query.
    pub fn ranked(&self) -> &[Product] {
        &self.ranked
    }

    /// When the last accepted fetch arrived.
    pub fn last_fetched_at(&self) -> Option<DateTime<Local>> {
        self.last_fetched_at
    }

    /// Rows the user can currently see and navigate.
    pub fn visible_results(&self) -> &[Product] {
        match self.results_view() {
            ResultsView::Populated(rows) => rows,
            _ => &[],
        }
    }

    /// Dropdown body, following loading > error > empty > populated.
    ///
    /// A commit that is still waiting out the debounce counts as loading
    /// until the first fetch has been requested.
    pub fn results_view(&self) -> ResultsView<'_> {
        match &self.status {
            FetchStatus::Loading => ResultsView::Loading,
            FetchStatus::Idle if self.controller.has_pending_commit() => ResultsView::Loading,
            FetchStatus::Failed(msg) => ResultsView::Error(msg),
            _ if self.ranked.is_empty() => ResultsView::Empty,
            _ => ResultsView::Populated(&self.ranked),
        }
    }

    // ----- Input editing -----

    /// Apply an edit to the input buffer.
    ///
    /// Cursor-only edits leave the controller alone. Text changes go
    /// through the controller: blank text resets the dropdown and selected
    /// product immediately; anything else opens the dropdown with no row
    /// highlighted and schedules a commit.
    pub fn edit_input(&mut self, edit: impl FnOnce(InputBuffer) -> InputBuffer, now: Instant) {
        let before = self.input.text().to_string();
        self.input = edit(std::mem::take(&mut self.input));
        self.focus = FocusPane::Input;
        if self.input.text() != before {
            self.input_changed(now);
        }
    }

    /// Replace the whole input text, as if typed.
    pub fn set_input_text(&mut self, text: &str, now: Instant) {
        self.input = InputBuffer::with_text(text);
        self.input_changed(now);
    }

    fn input_changed(&mut self, now: Instant) {
        match self.controller.update_raw_input(self.input.text(), now) {
            InputEffect::Reset => self.selection.reset(),
            InputEffect::Scheduled => self.selection.open(),
        }
    }

    /// Clear button: empty input, forget the committed query and selection.
    pub fn clear_input(&mut self) {
        self.controller.clear();
        self.input = InputBuffer::default();
        self.selection.reset();
        self.status = FetchStatus::Idle;
        self.rerank();
    }

    // ----- Fetch lifecycle -----

    /// Advance time. Returns a ticket when a debounced commit fires.
    pub fn tick(&mut self, now: Instant) -> Option<FetchTicket> {
        let ticket = self.controller.poll_commit(now)?;
        self.status = FetchStatus::Loading;
        Some(ticket)
    }

    /// Time until the next debounced commit, if one is pending.
    pub fn time_until_commit(&self, now: Instant) -> Option<Duration> {
        self.controller.time_until_commit(now)
    }

    /// Apply a fetch outcome.
    ///
    /// Outcomes for anything but the latest ticket are discarded and
    /// `false` is returned. The dropdown is never opened here.
    pub fn apply_fetch_outcome(&mut self, outcome: FetchOutcome, received_at: DateTime<Local>) -> bool {
        let generation = outcome.ticket.generation;
        if !self.controller.is_current(generation) {
            debug!(
                generation,
                latest = self.controller.latest_generation(),
                query = %outcome.ticket.query,
                "Discarding stale fetch outcome"
            );
            return false;
        }

        match outcome.result {
            Ok(products) => {
                debug!(generation, count = products.len(), cached = outcome.from_cache, "Catalog applied");
                self.catalog = Some(products);
                self.status = FetchStatus::Loaded;
                self.last_fetched_at = Some(received_at);
                self.rerank();
            }
            Err(err) => {
                warn!(generation, error = %err, "Catalog fetch failed");
                self.status = FetchStatus::Failed(err.to_string());
            }
        }
        true
    }

    fn rerank(&mut self) {
        self.ranked = match &self.catalog {
            Some(catalog) => rank_owned(catalog, self.controller.committed_query()),
            None => Vec::new(),
        };
        self.selection.revalidate(self.ranked.len());
    }

    // ----- Pagination -----

    /// Advance the page counter. Returns a ticket for the new page.
    pub fn next_page(&mut self) -> Option<FetchTicket> {
        let page = self.controller.page().saturating_add(1);
        self.change_page(page)
    }

    /// Go back one page. No-op on page 1.
    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        let page = self.controller.page().saturating_sub(1);
        self.change_page(page)
    }

    fn change_page(&mut self, page: u32) -> Option<FetchTicket> {
        let ticket = self.controller.set_page(page)?;
        self.status = FetchStatus::Loading;
        Some(ticket)
    }

    // ----- Selection -----

    /// Highlight the next visible row.
    pub fn next_result(&mut self) {
        let len = self.visible_results().len();
        self.selection.move_down(len, self.nav_policy);
    }

    /// Highlight the previous visible row.
    pub fn prev_result(&mut self) {
        let len = self.visible_results().len();
        self.selection.move_up(len, self.nav_policy);
    }

    /// Enter: select the highlighted row. Returns whether anything was selected.
    pub fn select_active(&mut self) -> bool {
        let Some(index) = self.selection.active_index() else {
            return false;
        };
        self.select_row(index)
    }

    /// Pointer click on a row.
    pub fn select_row(&mut self, index: usize) -> bool {
        if !self.selection.is_open() || index >= self.visible_results().len() {
            return false;
        }
        let Some(title) = self
            .selection
            .select_index(&self.ranked, index)
            .map(|p| p.display_title().to_string())
        else {
            return false;
        };
        self.controller.set_display_text(title.as_str());
        self.input = InputBuffer::with_text(title);
        true
    }

    /// Escape: close the dropdown, keep the selected product.
    pub fn dismiss(&mut self) {
        self.selection.dismiss();
    }

    /// Tab: close the dropdown and move focus between input and details.
    pub fn focus_next(&mut self) {
        match self.focus {
            FocusPane::Input => {
                self.selection.dismiss();
                self.focus = FocusPane::Details;
            }
            FocusPane::Details => self.focus_input(),
        }
    }

    /// Give the input focus, reopening the dropdown when there is
    /// something to show.
    pub fn focus_input(&mut self) {
        if self.focus == FocusPane::Input {
            return;
        }
        self.focus = FocusPane::Input;
        self.selection.focus_gained(
            !self.input.is_blank(),
            !self.controller.committed_query().is_empty(),
            self.ranked.len(),
        );
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
