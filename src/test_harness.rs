//! Acceptance Test Harness for TUI testing
//!
//! Wraps TuiApp<TestBackend> with a scripted catalog and a virtual clock
//! so debounce timing is deterministic. Fetches still run on worker
//! threads; `wait_for_fetch` blocks until the latest one lands.

use crate::catalog::{CatalogCache, CatalogClient, CatalogRequest, FetchPool};
use crate::config::KeyBindings;
use crate::model::{FetchError, Product};
use crate::state::{AppState, FetchStatus, NavPolicy};
use crate::view::{TuiApp, WidgetStyles};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Debounce used by the harness.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// How long `wait_for_fetch` waits before giving up.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Empty trailing lines are removed to keep snapshots clean.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Small catalog used across acceptance tests.
pub fn sample_catalog() -> Vec<Product> {
    vec![
        Product::new("1", "Red Shirt", "clothing")
            .with_image("https://img.example/red-shirt.png")
            .with_price(19.99),
        Product::new("2", "Blue Jeans", "clothing")
            .with_image("https://img.example/jeans.png")
            .with_price(49.0)
            .with_description("Straight fit denim."),
        Product::new("3", "Shirt Pin", "accessories").with_image("https://img.example/pin.png"),
        Product::new("4", "Desk Lamp", "home"),
    ]
}

// ===== Scripted catalog =====

/// Catalog client whose answers the test controls.
///
/// Every request gets the whole product list (ranking happens client
/// side) unless a query has its own response. Individual queries can be
/// held until released, to force responses to arrive out of order.
pub struct ScriptedCatalog {
    products: Vec<Product>,
    responses: HashMap<String, Vec<Product>>,
    fail: bool,
    gates: Mutex<HashMap<String, Receiver<()>>>,
    calls: AtomicUsize,
}

impl ScriptedCatalog {
    /// Answer every request with `products`.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            responses: HashMap::new(),
            fail: false,
            gates: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every request with a 500.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Answer `query` with `products` instead of the default list.
    pub fn respond_to(mut self, query: &str, products: Vec<Product>) -> Self {
        self.responses.insert(query.to_string(), products);
        self
    }

    /// Hold requests for `query` until the returned sender fires (or drops).
    pub fn hold(&self, query: &str) -> Sender<()> {
        let (tx, rx) = mpsc::channel();
        self.gates.lock().unwrap().insert(query.to_string(), rx);
        tx
    }

    /// Number of requests that reached the client.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CatalogClient for ScriptedCatalog {
    fn fetch(&self, request: &CatalogRequest) -> Result<Vec<Product>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gates.lock().unwrap().remove(&request.query);
        if let Some(gate) = gate {
            let _ = gate.recv();
        }

        if self.fail {
            return Err(FetchError::Status {
                url: "http://catalog.test/products".to_string(),
                status: 500,
            });
        }
        Ok(self
            .responses
            .get(&request.query)
            .unwrap_or(&self.products)
            .clone())
    }
}

// ===== Harness =====

/// Test harness for acceptance testing
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    catalog: Arc<ScriptedCatalog>,
    now: Instant,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Harness over `sample_catalog()` with an 80x24 terminal.
    pub fn new() -> Self {
        Self::with_catalog(ScriptedCatalog::new(sample_catalog()), 80, 24)
    }

    /// Harness over a custom catalog and terminal size.
    pub fn with_catalog(catalog: ScriptedCatalog, width: u16, height: u16) -> Self {
        Self::with_options(catalog, width, height, NavPolicy::Wrap)
    }

    /// Harness with an explicit navigation policy.
    pub fn with_options(
        catalog: ScriptedCatalog,
        width: u16,
        height: u16,
        nav_policy: NavPolicy,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let client: Arc<dyn CatalogClient> = catalog.clone();
        let pool = FetchPool::new(client, CatalogCache::default());

        let app = TuiApp::with_terminal(
            terminal,
            AppState::new(DEBOUNCE, nav_policy),
            pool,
            KeyBindings::default(),
            WidgetStyles::default(),
        );

        Self {
            app,
            catalog,
            now: Instant::now(),
            running: true,
        }
    }

    /// The scripted client, for holding requests and counting calls.
    pub fn catalog(&self) -> &ScriptedCatalog {
        &self.catalog
    }

    /// Send a single key event. Returns true if the app quit.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods), self.now);
        if quit {
            self.running = false;
        }
        quit
    }

    /// Send a sequence of keys, stopping early on quit.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break;
            }
        }
    }

    /// Type text one character at a time, without advancing the clock.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break;
            }
        }
    }

    /// Move the virtual clock forward and run one loop step.
    ///
    /// Returns whether the step changed anything.
    pub fn advance(&mut self, by: Duration) -> bool {
        self.now += by;
        self.app.step_test(self.now)
    }

    /// Advance exactly past the debounce so a pending commit fires.
    pub fn settle(&mut self) -> bool {
        self.advance(DEBOUNCE)
    }

    /// Wait until the latest request has landed (or failed).
    ///
    /// Stale outcomes that arrive first are drained along the way. Returns
    /// immediately if nothing is loading.
    pub fn wait_for_fetch(&mut self) {
        while *self.state().status() == FetchStatus::Loading {
            if self.app.await_fetch_test(FETCH_TIMEOUT) == 0 {
                break;
            }
        }
    }

    /// Block for the next outcome, current or not. Returns how many arrived.
    pub fn wait_for_any_outcome(&mut self) -> usize {
        self.app.await_fetch_test(FETCH_TIMEOUT)
    }

    /// Type `text`, let the debounce expire and wait for the fetch.
    pub fn search(&mut self, text: &str) {
        self.type_text(text);
        self.settle();
        self.wait_for_fetch();
    }

    /// Access app state for assertions
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Check if app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    /// Send a left click at the given cell.
    ///
    /// Renders first so hit testing sees the current layout.
    pub fn click_at(&mut self, column: u16, row: u16) {
        if !self.running {
            return;
        }
        let _ = self.app.render_test();

        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }
}
