//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod input_handler;
pub mod selection;

// Re-export for convenience
pub use app_state::{AppState, FetchStatus, FocusPane, ResultsView};
pub use input_handler::InputBuffer;
pub use selection::{Dropdown, NavPolicy, SelectionState};
