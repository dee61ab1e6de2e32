//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Keys without a binding (printable characters, Backspace, Delete, the
/// horizontal arrows, Home, End) are left to the input box for editing.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// `KeyEvent` equality covers kind and state too, so only code and
    /// modifiers are used for the lookup.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Bind `key` to `action`, replacing any existing binding for the key.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let mut bind = |code, modifiers, action| {
            bindings.insert(KeyEvent::new(code, modifiers), action);
        };

        // Dropdown
        bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::NextResult);
        bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::PrevResult);
        bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::SelectResult);
        bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::CloseDropdown);
        bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::FocusNext);

        // Input
        bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::ClearInput);

        // Paging
        bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::NextPage);
        bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PrevPage);

        // Application
        bind(KeyCode::F(1), KeyModifiers::NONE, KeyAction::Help);
        bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        Self { bindings }
    }
}
