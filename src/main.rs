//! Binary entry point that glues the SQLite-backed record store to the TUI.
//! The bootstrapping pipeline is short: open (or create) the database under
//! the user's home directory, hydrate the app state from it, and drive the
//! Ratatui event loop until the user exits.
use announcement_composer::{run_app, App, SqliteStore};

/// Open persistence and launch the Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unwritable home directory) to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let store = SqliteStore::open_default()?;
    let mut app = App::new(Box::new(store));
    run_app(&mut app)
}
