//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the search input in lines (border + content).
pub const INPUT_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Most result rows the dropdown shows at once. Longer lists scroll to
/// keep the highlighted row visible.
pub const DROPDOWN_MAX_ROWS: u16 = 8;

/// Body height of the dropdown when it shows a message instead of rows.
pub const DROPDOWN_MESSAGE_ROWS: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 70;
