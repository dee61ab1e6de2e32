//! Widget styling configuration.
//!
//! One palette for the whole widget. Colors can be switched off with
//! `--no-color` or `NO_COLOR`; highlighting then falls back to reverse video
//! so the active row stays visible.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== WidgetStyles =====

/// Styles for every part of the search widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetStyles {
    /// Border of an unfocused pane.
    pub border: Style,
    /// Border of the focused pane.
    pub border_focused: Style,
    /// Highlighted dropdown row.
    pub active_row: Style,
    /// Secondary text (categories, hosts, hints).
    pub muted: Style,
    /// Error message in the dropdown.
    pub error: Style,
    /// Product title in the detail card.
    pub title: Style,
    /// Price in the detail card.
    pub price: Style,
    /// Category headers in the help overlay.
    pub section_header: Style,
    /// Key names in the help overlay.
    pub key: Style,
}

impl WidgetStyles {
    /// Build styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if config.colors_enabled() {
            Self {
                border: Style::default().fg(Color::DarkGray),
                border_focused: Style::default().fg(Color::Cyan),
                active_row: Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
                muted: Style::default().fg(Color::Gray),
                error: Style::default().fg(Color::Red),
                title: bold.fg(Color::White),
                price: Style::default().fg(Color::Green),
                section_header: bold.fg(Color::Magenta),
                key: bold.fg(Color::Yellow),
            }
        } else {
            Self {
                border: Style::default(),
                border_focused: bold,
                active_row: Style::default().add_modifier(Modifier::REVERSED),
                muted: Style::default(),
                error: bold,
                title: bold,
                price: Style::default(),
                section_header: bold,
                key: bold,
            }
        }
    }
}

impl Default for WidgetStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
