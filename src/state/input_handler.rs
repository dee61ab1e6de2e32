//! Text input editing (pure state transitions).
//!
//! Handles keystroke-level edits of the search box. All functions are pure:
//! they take an `InputBuffer` by value and return the edited buffer.
//! The cursor counts characters, not bytes.

/// Text in the search box plus cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    /// Buffer holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the buffer has nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Insert a character at the cursor and advance the cursor.
pub fn handle_char_input(mut buffer: InputBuffer, ch: char) -> InputBuffer {
    let at = buffer.byte_offset(buffer.cursor);
    buffer.text.insert(at, ch);
    buffer.cursor += 1;
    buffer
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut buffer: InputBuffer) -> InputBuffer {
    if buffer.cursor == 0 {
        return buffer;
    }
    let at = buffer.byte_offset(buffer.cursor - 1);
    buffer.text.remove(at);
    buffer.cursor -= 1;
    buffer
}

/// Delete the character under the cursor. No-op at the end.
pub fn handle_delete(mut buffer: InputBuffer) -> InputBuffer {
    if buffer.cursor >= buffer.text.chars().count() {
        return buffer;
    }
    let at = buffer.byte_offset(buffer.cursor);
    buffer.text.remove(at);
    buffer
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut buffer: InputBuffer) -> InputBuffer {
    buffer.cursor = buffer.cursor.saturating_sub(1);
    buffer
}

/// Move cursor right by one position. Saturates at the text length.
pub fn handle_cursor_right(mut buffer: InputBuffer) -> InputBuffer {
    let max_cursor = buffer.text.chars().count();
    buffer.cursor = (buffer.cursor + 1).min(max_cursor);
    buffer
}

/// Move cursor to the start.
pub fn handle_home(mut buffer: InputBuffer) -> InputBuffer {
    buffer.cursor = 0;
    buffer
}

/// Move cursor to the end.
pub fn handle_end(mut buffer: InputBuffer) -> InputBuffer {
    buffer.cursor = buffer.text.chars().count();
    buffer
}

// ===== Tests =====

#[cfg(test)]
#[path = "input_handler_tests.rs"]
mod tests;
