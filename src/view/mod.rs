//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod detail_card;
pub mod dropdown;
mod help;
pub mod layout;
pub mod search_input;
mod status_bar;
mod styles;

pub use detail_card::DetailCard;
pub use dropdown::ResultDropdown;
pub use help::render_help_overlay;
pub use layout::WidgetAreas;
pub use search_input::SearchInput;
pub use status_bar::StatusBar;
pub use styles::{ColorConfig, WidgetStyles};

use crate::catalog::{CatalogCache, FetchPool, HttpCatalog, HttpCatalogOptions};
use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{AppError, KeyAction};
use crate::state::{input_handler, AppState, InputBuffer};
use chrono::Local;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Position,
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Longest the event loop sleeps without checking for fetch outcomes.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Startup options that are not part of the resolved config.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Text to pre-fill the input with; its commit is scheduled as if typed.
    pub initial_query: Option<String>,
    /// Disable colors.
    pub no_color: bool,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    pool: FetchPool,
    styles: WidgetStyles,
    /// Regions from the last draw (for mouse hit testing)
    last_areas: Option<WidgetAreas>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(app_state: AppState, pool: FetchPool, styles: WidgetStyles) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::with_terminal(
            terminal,
            app_state,
            pool,
            KeyBindings::default(),
            styles,
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (Ctrl+C). The poll timeout shrinks to
    /// the pending debounce deadline so commits fire on time; otherwise
    /// the loop wakes every `TICK_INTERVAL` to collect fetch outcomes.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let timeout = self
                .app_state
                .time_until_commit(Instant::now())
                .map_or(TICK_INTERVAL, |d| d.min(TICK_INTERVAL));

            let mut dirty = false;
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key, Instant::now()) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        dirty = true;
                    }
                    _ => {}
                }
            }

            dirty |= self.step(Instant::now());

            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Assemble an app around an existing terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        app_state: AppState,
        pool: FetchPool,
        key_bindings: KeyBindings,
        styles: WidgetStyles,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            pool,
            styles,
            last_areas: None,
        }
    }

    /// Fire due commits and apply finished fetches.
    ///
    /// Returns whether anything changed.
    fn step(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(ticket) = self.app_state.tick(now) {
            self.pool.dispatch(ticket, now);
            changed = true;
        }

        for outcome in self.pool.drain(now) {
            changed |= self.app_state.apply_fetch_outcome(outcome, Local::now());
        }

        changed
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        // Windows reports releases too
        if key.kind != KeyEventKind::Press {
            return false;
        }

        if self.app_state.help_visible && key.code == KeyCode::Esc {
            self.app_state.toggle_help();
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            self.handle_edit_key(key, now);
            return false;
        };

        match action {
            KeyAction::NextResult => self.app_state.next_result(),
            KeyAction::PrevResult => self.app_state.prev_result(),
            KeyAction::SelectResult => {
                self.app_state.select_active();
            }
            KeyAction::CloseDropdown => self.app_state.dismiss(),
            KeyAction::FocusNext => self.app_state.focus_next(),
            KeyAction::ClearInput => self.app_state.clear_input(),
            KeyAction::NextPage => {
                if let Some(ticket) = self.app_state.next_page() {
                    self.pool.dispatch(ticket, now);
                }
            }
            KeyAction::PrevPage => {
                if let Some(ticket) = self.app_state.prev_page() {
                    self.pool.dispatch(ticket, now);
                }
            }
            KeyAction::Help => self.app_state.toggle_help(),
            KeyAction::Quit => return true,
        }

        false
    }

    /// Unbound keys edit the search input.
    fn handle_edit_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return;
        }

        let edit: fn(InputBuffer) -> InputBuffer = match key.code {
            KeyCode::Char(ch) => {
                self.app_state
                    .edit_input(|b| input_handler::handle_char_input(b, ch), now);
                return;
            }
            KeyCode::Backspace => input_handler::handle_backspace,
            KeyCode::Delete => input_handler::handle_delete,
            KeyCode::Left => input_handler::handle_cursor_left,
            KeyCode::Right => input_handler::handle_cursor_right,
            KeyCode::Home => input_handler::handle_home,
            KeyCode::End => input_handler::handle_end,
            _ => return,
        };
        self.app_state.edit_input(edit, now);
    }

    /// Handle a single mouse event
    ///
    /// Left click on a dropdown row selects it; left click on the input
    /// gives it focus. Everything else is ignored.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(areas) = self.last_areas else {
            return;
        };
        let point = Position::new(mouse.column, mouse.row);

        if let Some(dropdown_area) = areas.dropdown {
            if dropdown_area.contains(point) {
                let len = self.app_state.visible_results().len();
                let active = self.app_state.selection().active_index();
                if let Some(index) =
                    dropdown::row_at(dropdown_area, mouse.column, mouse.row, len, active)
                {
                    self.app_state.select_row(index);
                }
                return;
            }
        }

        if areas.input.contains(point) {
            self.app_state.focus_input();
        }
    }

    /// Render the current frame and remember where everything went
    fn draw(&mut self) -> Result<(), TuiError> {
        let mut areas = None;
        self.terminal.draw(|frame| {
            areas = Some(layout::render_layout(frame, &self.app_state, &self.styles));
        })?;
        self.last_areas = areas;
        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: Backend,
{
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent, now: Instant) -> bool {
        self.handle_key(key, now)
    }

    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    pub(crate) fn step_test(&mut self, now: Instant) -> bool {
        self.step(now)
    }

    /// Block until at least one fetch outcome arrives, then apply it.
    pub(crate) fn await_fetch_test(&mut self, timeout: Duration) -> usize {
        if self.pool.in_flight() == 0 {
            return 0;
        }
        let outcomes = self.pool.drain_blocking(timeout);
        let count = outcomes.len();
        for outcome in outcomes {
            self.app_state.apply_fetch_outcome(outcome, Local::now());
        }
        count
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Build the catalog client and fetch pool described by `config`.
///
/// # Errors
///
/// Returns `AppError::Config` for an invalid endpoint and `AppError::Fetch`
/// if the HTTP client cannot be created.
pub fn build_fetch_pool(config: &ResolvedConfig) -> Result<FetchPool, AppError> {
    let client = HttpCatalog::new(HttpCatalogOptions {
        endpoint: config.endpoint_url()?,
        timeout: config.request_timeout,
        retries: config.retries,
        page_size: config.page_size,
        forward_query_params: config.forward_query_params,
    })?;
    info!(endpoint = %client.endpoint(), "Catalog client ready");

    Ok(FetchPool::new(
        Arc::new(client),
        CatalogCache::new(config.stale_after, config.cache_ttl, config.cache_capacity),
    ))
}

/// Initialize and run the TUI with a resolved configuration
///
/// The terminal is restored before returning, whether the loop ended
/// normally or with an error.
pub fn run_with_config(config: &ResolvedConfig, options: RunOptions) -> Result<(), TuiError> {
    let pool = build_fetch_pool(config)?;

    let mut app_state = AppState::new(config.debounce, config.nav_policy);
    if let Some(query) = options.initial_query.as_deref() {
        app_state.set_input_text(query, Instant::now());
    }

    let styles = WidgetStyles::with_color_config(ColorConfig::from_env_and_args(options.no_color));
    let mut app = TuiApp::new(app_state, pool, styles)?;

    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
