//! Dropdown selection state machine.
//!
//! SelectionState tracks whether the dropdown is open, which row is
//! highlighted, and which product was picked. The highlighted row is an
//! `Option<usize>`; `None` means no row is active.
//!
//! # Invariant
//!
//! While open, `active` is `None` or a valid index into the ranked results.
//! Callers must call [`SelectionState::revalidate`] whenever the result
//! length changes.

use crate::model::Product;
use serde::Deserialize;
use std::fmt;

// ===== NavPolicy =====

/// What arrow keys do at the ends of the list.
///
/// Parsed by serde from the config file and by clap from `--nav`; both use
/// the lowercase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NavPolicy {
    /// Down from the last row goes to the first, up from the first to the last.
    #[default]
    Wrap,
    /// Arrow keys stop at the first and last rows.
    Clamp,
}

impl NavPolicy {
    /// Config/CLI spelling of the policy.
    pub fn as_str(self) -> &'static str {
        match self {
            NavPolicy::Wrap => "wrap",
            NavPolicy::Clamp => "clamp",
        }
    }
}

impl fmt::Display for NavPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Dropdown =====

/// Dropdown visibility. Sum type: the active row only exists while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dropdown {
    /// Dropdown hidden.
    #[default]
    Closed,
    /// Dropdown visible, optionally with a highlighted row.
    Open {
        /// Highlighted row index into the ranked results.
        active: Option<usize>,
    },
}

// ===== SelectionState =====

/// Dropdown, highlighted row and selected product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    dropdown: Dropdown,
    selected: Option<Product>,
}

impl SelectionState {
    /// Closed dropdown, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current dropdown state.
    pub fn dropdown(&self) -> Dropdown {
        self.dropdown
    }

    /// Whether the dropdown is visible.
    pub fn is_open(&self) -> bool {
        matches!(self.dropdown, Dropdown::Open { .. })
    }

    /// Highlighted row, only while open.
    pub fn active_index(&self) -> Option<usize> {
        match self.dropdown {
            Dropdown::Open { active } => active,
            Dropdown::Closed => None,
        }
    }

    /// Product shown in the detail card.
    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    /// Open the dropdown with no highlighted row.
    pub fn open(&mut self) {
        self.dropdown = Dropdown::Open { active: None };
    }

    /// Close the dropdown, keeping the selected product.
    pub fn dismiss(&mut self) {
        self.dropdown = Dropdown::Closed;
    }

    /// Hard reset for blank input: close and forget the selected product.
    pub fn reset(&mut self) {
        self.dropdown = Dropdown::Closed;
        self.selected = None;
    }

    /// Highlight the next row. No-op while closed or with no results.
    pub fn move_down(&mut self, len: usize, policy: NavPolicy) {
        let Dropdown::Open { active } = self.dropdown else {
            return;
        };
        if len == 0 {
            self.dropdown = Dropdown::Open { active: None };
            return;
        }
        let next = match (active, policy) {
            (None, _) => 0,
            (Some(i), NavPolicy::Wrap) => (i + 1) % len,
            (Some(i), NavPolicy::Clamp) => (i + 1).min(len - 1),
        };
        self.dropdown = Dropdown::Open { active: Some(next) };
    }

    /// Highlight the previous row. No-op while closed or with no results.
    pub fn move_up(&mut self, len: usize, policy: NavPolicy) {
        let Dropdown::Open { active } = self.dropdown else {
            return;
        };
        if len == 0 {
            self.dropdown = Dropdown::Open { active: None };
            return;
        }
        let prev = match (active, policy) {
            (None, NavPolicy::Wrap) => len - 1,
            (None, NavPolicy::Clamp) => 0,
            (Some(0), NavPolicy::Wrap) => len - 1,
            (Some(i), NavPolicy::Wrap) => (i - 1).min(len - 1),
            (Some(i), NavPolicy::Clamp) => i.saturating_sub(1).min(len - 1),
        };
        self.dropdown = Dropdown::Open { active: Some(prev) };
    }

    /// Select the highlighted row (Enter).
    ///
    /// Returns the selected product so the caller can copy its title into
    /// the input. Returns `None` and changes nothing when no row is active.
    pub fn select_active<'a>(&mut self, results: &'a [Product]) -> Option<&'a Product> {
        let index = self.active_index()?;
        self.select_index(results, index)
    }

    /// Select a row by index (pointer click). Same effect as Enter on it.
    pub fn select_index<'a>(&mut self, results: &'a [Product], index: usize) -> Option<&'a Product> {
        let product = results.get(index)?;
        self.selected = Some(product.clone());
        self.dropdown = Dropdown::Closed;
        Some(product)
    }

    /// Re-check the highlighted row against a new result length.
    pub fn revalidate(&mut self, len: usize) {
        if let Dropdown::Open { active: Some(i) } = self.dropdown {
            if i >= len {
                self.dropdown = Dropdown::Open { active: None };
            }
        }
    }

    /// Input regained focus.
    ///
    /// Reopens only if there is input, a committed query, and at least one
    /// result; an empty dropdown is never reopened.
    pub fn focus_gained(&mut self, input_non_empty: bool, has_committed_query: bool, result_count: usize) {
        if input_non_empty && has_committed_query && result_count > 0 && !self.is_open() {
            self.open();
        }
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
