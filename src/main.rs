//! livescroll-articles — an infinitely scrolling, searchable article feed
//! for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐ FetchOutcome ┌──────────────────┐ draw() ┌──────────┐
//! │ source/   │ ───────────► │ sync/ (controller│ ─────► │  ui.rs   │
//! │ (tokio    │  (channel)   │  + store + view) │        │ (render) │
//! │  tasks)   │ ◄─────────── └──────────────────┘        └──────────┘
//! └───────────┘  spawn fetch          ▲
//!                                     │ intents via app.rs
//!                                ┌──────────┐
//!                                │ input.rs │
//!                                └──────────┘
//! ```
//!
//! * **`source/`** — the `ArticleSource` trait and the Article Search
//!   implementation.
//! * **`sync/`** — the synchronization engine: pagination, search overlay,
//!   and the read-only view the UI renders.
//! * **`app`** — screen state (selection, search input) around the engine.
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` actions.
//! * **`config`**, **`logging`** — startup plumbing.
//! * **`main`** — wires everything together: read config, set up the
//!   terminal, and run the event loop.

mod app;
mod config;
mod input;
mod logging;
mod source;
mod sync;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use app::App;
use config::Config;
use source::{ArticleSource, NytSource};
use sync::FeedController;

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // -- configuration and logging -------------------------------------------
    let config = Config::from_env()?;
    let log_path = logging::init(&config.log_filter)?;
    info!(log = %log_path.display(), topic = ?config.topic, "starting");

    // -- configure the article source ----------------------------------------
    let source: Arc<dyn ArticleSource> = Arc::new(
        NytSource::new(
            config.base_url.as_str(),
            config.api_key.as_str(),
            config.topic.clone(),
            config.timeout,
        )
        .context("building HTTP client")?,
    );

    // -- start the engine (issues the page-0 request) ------------------------
    let mut app = App::new(FeedController::new(source));

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    install_panic_hook();
    let mut guard = TerminalGuard::new()?;

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Apply any fetch outcomes that have arrived.
    //   2. Render the UI.
    //   3. Poll for keyboard input (up to tick_rate).
    //
    // Input polling blocks this thread, so it runs under `block_in_place`
    // to let the runtime keep driving the fetch tasks meanwhile.
    let tick_rate = Duration::from_millis(100);

    loop {
        app.tick();

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        let next_event = tokio::task::block_in_place(|| -> io::Result<Option<Event>> {
            if event::poll(tick_rate)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })?;
        if let Some(Event::Key(key)) = next_event {
            input::handle_key_event(&mut app, key);
        }

        if app.quit {
            break;
        }
    }

    info!(
        articles = app.feed.store().accumulated().len(),
        "shutting down"
    );
    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
