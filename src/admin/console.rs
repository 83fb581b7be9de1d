//! Event loop and key handling for the admin console.

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::{debug, warn};

use crate::Error;
use crate::error_chain;
use crate::store::Store;

use super::commands::{CommandResult, execute_command};
use super::state::{AdminState, AdminView, ChoiceFilter};
use super::terminal::ConsoleTerminal;
use super::ui;

pub fn run_event_loop(
    terminal: &mut ConsoleTerminal,
    state: &mut AdminState,
    store: &Store,
) -> Result<(), Error> {
    while !state.should_quit {
        terminal.draw(|frame| ui::render(frame, state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(state, store, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the console should exit.
pub fn handle_input(state: &mut AdminState, store: &Store, key: KeyCode) -> bool {
    // Help closes on Esc, or on Enter with nothing typed
    if state.current_view == AdminView::Help
        && (key == KeyCode::Esc || (key == KeyCode::Enter && state.command_input.is_empty()))
    {
        let previous = state.previous_view.take().unwrap_or_default();
        switch_view(state, store, previous);
        return false;
    }

    match key {
        KeyCode::Char(c) => {
            state.command_input.push(c);
        }
        KeyCode::Backspace => {
            state.command_input.pop();
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut state.command_input);
            debug!(command = %input, "running console command");
            match execute_command(state, store, &input) {
                CommandResult::Ok(Some(msg)) => state.add_to_history(msg),
                CommandResult::Ok(None) => {}
                CommandResult::Error(msg) => {
                    warn!(command = %input, error = %msg, "console command failed");
                    state.add_to_history(format!("Error: {}", msg));
                }
                CommandResult::Quit => return true,
            }
        }
        KeyCode::Esc => {
            state.command_input.clear();
        }
        KeyCode::Tab => {
            let next = match state.current_view {
                AdminView::Questions => AdminView::Choices(ChoiceFilter::All),
                AdminView::Choices(_) | AdminView::QuestionDetail(_) | AdminView::Help => {
                    AdminView::Questions
                }
            };
            switch_view(state, store, next);
        }
        KeyCode::Down => state.scroll_down(),
        KeyCode::Up => state.scroll_up(),
        _ => {}
    }

    false
}

fn switch_view(state: &mut AdminState, store: &Store, view: AdminView) {
    if let Err(err) = state.show(view, store) {
        state.add_to_history(format!("Error: {}", error_chain(&err)));
    }
}
