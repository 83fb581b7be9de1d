//! Full-screen terminal console for managing questions and choices.

pub mod commands;
pub mod console;
pub mod state;
pub mod terminal;
pub mod ui;

use tracing::info;

use crate::Error;
use crate::store::Store;

pub use commands::{CommandResult, execute_command};
pub use state::{AdminState, AdminView, ChoiceFilter};

/// Run the console until the user quits.
pub fn run(store: &Store, database: impl Into<String>) -> Result<(), Error> {
    let mut state = AdminState::new(database);
    state.refresh(store)?;

    info!(database = %state.database, "starting admin console");
    let mut session = terminal::TerminalSession::enter()?;
    let result = console::run_event_loop(session.terminal(), &mut state, store);
    drop(session);

    info!("admin console closed");
    result
}
