//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Keys without a binding fall through to text editing of the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Dropdown navigation
    /// Highlight the next result row. Default: ↓
    NextResult,
    /// Highlight the previous result row. Default: ↑
    PrevResult,
    /// Select the highlighted row. Default: Enter
    SelectResult,
    /// Close the dropdown, keep the selection. Default: Esc
    CloseDropdown,
    /// Close the dropdown and move focus to the next pane. Default: Tab
    FocusNext,

    // Input
    /// Clear the input and reset the widget. Default: Ctrl+u
    ClearInput,

    // Paging
    /// Advance the page counter. Default: Page Down
    NextPage,
    /// Step the page counter back. Default: Page Up
    PrevPage,

    // Application
    /// Show or hide the help overlay. Default: F1
    Help,
    /// Exit the application. Default: Ctrl+c
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn navigation_actions_are_distinct() {
        assert_ne!(KeyAction::NextResult, KeyAction::PrevResult);
        assert_ne!(KeyAction::CloseDropdown, KeyAction::FocusNext);
    }

    #[test]
    fn actions_are_hashable() {
        let set: HashSet<KeyAction> = [
            KeyAction::NextResult,
            KeyAction::PrevResult,
            KeyAction::NextResult,
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }
}
