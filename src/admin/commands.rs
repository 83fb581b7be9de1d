//! Console command parser and executor.
//!
//! Every admin operation the console supports is listed in
//! [`execute_command`]; there is no generic dispatch over the models.

use std::path::Path;

use crate::error_chain;
use crate::import::{self, ImportOptions};
use crate::store::Store;

use super::state::{AdminState, AdminView, ChoiceFilter, INLINE_EXTRA};

/// Result of executing a command.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Ok(Option<String>),
    /// Command failed with an error message.
    Error(String),
    /// Console should quit.
    Quit,
}

type Outcome = Result<Option<String>, String>;

/// Parse and execute a command, then refresh the state for display.
pub fn execute_command(state: &mut AdminState, store: &Store, input: &str) -> CommandResult {
    let input = input.trim();
    if input.is_empty() {
        return CommandResult::Ok(None);
    }

    let (command, args) = match input.split_once(char::is_whitespace) {
        Some((command, args)) => (command, args.trim()),
        None => (input, ""),
    };
    let command = command.to_lowercase();

    let outcome = match command.as_str() {
        "list" => cmd_list(state, store),
        "search" => cmd_search(state, store, args),
        "add" => cmd_add(state, store, args),
        "open" => cmd_open(state, store, args),
        "edit" => cmd_edit(state, store, args),
        "delete" => cmd_delete(state, store, args),
        "choice" => cmd_choice(state, store, args),
        "correct" => cmd_mark(state, store, args, true),
        "incorrect" => cmd_mark(state, store, args, false),
        "remove" => cmd_remove(state, store, args),
        "choices" => cmd_choices(state, store, args),
        "import" => cmd_import(store, args),
        "back" => cmd_back(state, store),
        "help" | "?" => cmd_help(state),
        "quit" | "exit" => {
            state.should_quit = true;
            return CommandResult::Quit;
        }
        _ => Err(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            command
        )),
    };

    if let Err(err) = state.refresh(store) {
        return CommandResult::Error(error_chain(&err));
    }
    match outcome {
        Ok(msg) => CommandResult::Ok(msg),
        Err(msg) => CommandResult::Error(msg),
    }
}

fn failed(err: impl std::error::Error) -> String {
    error_chain(&err)
}

fn parse_id(args: &str, usage: &str) -> Result<i64, String> {
    let arg = args.split_whitespace().next().ok_or_else(|| usage.to_string())?;
    arg.trim_start_matches('#')
        .parse()
        .map_err(|_| format!("Invalid question id: {}", arg))
}

/// Split `<slot> <rest>` and check the slot against the open question.
fn parse_slot<'a>(state: &AdminState, args: &'a str, usage: &str) -> Result<(usize, &'a str), String> {
    let (slot, rest) = match args.split_once(char::is_whitespace) {
        Some((slot, rest)) => (slot, rest.trim()),
        None => (args, ""),
    };
    if slot.is_empty() {
        return Err(usage.to_string());
    }
    let slot: usize = slot
        .parse()
        .map_err(|_| format!("Invalid slot: {}", slot))?;
    let slots = state.inline_slots();
    if slot == 0 || slot > slots {
        return Err(format!("Slot must be between 1 and {}.", slots));
    }
    Ok((slot, rest))
}

fn require_open(state: &AdminState) -> Result<i64, String> {
    state
        .open_question()
        .map(|detail| detail.question.id)
        .ok_or_else(|| "Open a question first: open <id>".to_string())
}

/// Show every question, dropping any search.
fn cmd_list(state: &mut AdminState, store: &Store) -> Outcome {
    state.search = None;
    state.show(AdminView::Questions, store).map_err(failed)?;
    Ok(Some(format!("{} question(s).", state.questions.len())))
}

fn cmd_search(state: &mut AdminState, store: &Store, args: &str) -> Outcome {
    if args.is_empty() {
        return Err("Usage: search <words>".to_string());
    }
    state.search = Some(args.to_string());
    state.show(AdminView::Questions, store).map_err(failed)?;
    Ok(Some(format!(
        "{} question(s) match '{}'.",
        state.questions.len(),
        args
    )))
}

fn cmd_add(state: &mut AdminState, store: &Store, args: &str) -> Outcome {
    if args.is_empty() {
        return Err("Usage: add <question text>".to_string());
    }
    let question = store.create_question(args).map_err(failed)?;
    state
        .show(AdminView::QuestionDetail(question.id), store)
        .map_err(failed)?;
    Ok(Some(format!(
        "Added question #{}. Fill its choices with: choice <slot> <text>",
        question.id
    )))
}

fn cmd_open(state: &mut AdminState, store: &Store, args: &str) -> Outcome {
    let id = parse_id(args, "Usage: open <id>")?;
    if store.question(id).map_err(failed)?.is_none() {
        return Err(format!("Question not found: #{}", id));
    }
    state
        .show(AdminView::QuestionDetail(id), store)
        .map_err(failed)?;
    Ok(None)
}

fn cmd_edit(state: &mut AdminState, store: &Store, args: &str) -> Outcome {
    let id = require_open(state)?;
    if args.is_empty() {
        return Err("Usage: edit <question text>".to_string());
    }
    store.update_question(id, args).map_err(failed)?;
    Ok(Some(format!("Updated question #{}.", id)))
}

/// Delete a question and, through the cascade, its choices.
fn cmd_delete(state: &mut AdminState, store: &Store, args: &str) -> Outcome {
    let id = if args.is_empty() {
        require_open(state)?
    } else {
        parse_id(args, "Usage: delete [<id>]")?
    };
    let removed = store.delete_question(id).map_err(failed)?;
    if state.current_view == AdminView::QuestionDetail(id) {
        state.show(AdminView::Questions, store).map_err(failed)?;
    }
    Ok(Some(format!(
        "Deleted question #{} and {} choice(s).",
        id, removed
    )))
}

/// Inline edit: existing slots are updated, blank slots create a choice.
fn cmd_choice(state: &mut AdminState, store: &Store, args: &str) -> Outcome {
    let question_id = require_open(state)?;
    let (slot, text) = parse_slot(state, args, "Usage: choice <slot> <text>")?;
    if text.is_empty() {
        return Err("Usage: choice <slot> <text>".to_string());
    }

    let existing = state
        .open_question()
        .and_then(|detail| detail.choices.get(slot - 1))
        .cloned();
    match existing {
        Some(choice) => {
            store
                .update_choice(choice.id, text, choice.is_correct)
                .map_err(failed)?;
            Ok(Some(format!("Updated choice {}.", slot)))
        }
        None => {
            store
                .create_choice(question_id, text, false)
                .map_err(failed)?;
            Ok(Some(format!(
                "Added choice {}. {} blank slot(s) follow it.",
                slot, INLINE_EXTRA
            )))
        }
    }
}

fn cmd_mark(state: &mut AdminState, store: &Store, args: &str, is_correct: bool) -> Outcome {
    require_open(state)?;
    let usage = if is_correct {
        "Usage: correct <slot>"
    } else {
        "Usage: incorrect <slot>"
    };
    let (slot, _) = parse_slot(state, args, usage)?;
    let choice = state
        .open_question()
        .and_then(|detail| detail.choices.get(slot - 1))
        .cloned()
        .ok_or_else(|| format!("Slot {} is blank.", slot))?;

    store
        .update_choice(choice.id, &choice.text, is_correct)
        .map_err(failed)?;
    let verdict = if is_correct { "correct" } else { "incorrect" };
    Ok(Some(format!("Marked choice {} {}.", slot, verdict)))
}

fn cmd_remove(state: &mut AdminState, store: &Store, args: &str) -> Outcome {
    require_open(state)?;
    let (slot, _) = parse_slot(state, args, "Usage: remove <slot>")?;
    let choice = state
        .open_question()
        .and_then(|detail| detail.choices.get(slot - 1))
        .cloned()
        .ok_or_else(|| format!("Slot {} is blank.", slot))?;

    store.delete_choice(choice.id).map_err(failed)?;
    Ok(Some(format!("Removed choice {}.", slot)))
}

fn cmd_choices(state: &mut AdminState, store: &Store, args: &str) -> Outcome {
    let filter = ChoiceFilter::parse(args)
        .ok_or_else(|| "Usage: choices [all|correct|incorrect]".to_string())?;
    state
        .show(AdminView::Choices(filter), store)
        .map_err(failed)?;
    Ok(Some(format!(
        "{} choice(s) ({}).",
        state.choices.len(),
        filter.label().to_lowercase()
    )))
}

/// `import <path> [--strict] [--no-atomic]`; the path may contain spaces.
fn cmd_import(store: &Store, args: &str) -> Outcome {
    let (path, options) = parse_import_args(args);
    if path.is_empty() {
        return Err("Usage: import <path> [--strict] [--no-atomic]".to_string());
    }

    let summary = import::import_file(store, Path::new(path), options).map_err(failed)?;
    if summary.without_correct.is_empty() {
        Ok(Some(summary.to_string()))
    } else {
        let lines: Vec<String> = summary
            .without_correct
            .iter()
            .map(|line| line.to_string())
            .collect();
        Ok(Some(format!(
            "{} No correct choice on row(s): {}",
            summary,
            lines.join(", ")
        )))
    }
}

/// Peel flags off either end of the arguments. The path in between is kept
/// verbatim, whitespace included.
fn parse_import_args(args: &str) -> (&str, ImportOptions) {
    let mut options = ImportOptions::default();
    let mut rest = args.trim();
    while let Some(remaining) = take_flag(rest, &mut options) {
        rest = remaining;
    }
    (rest, options)
}

fn take_flag<'a>(rest: &'a str, options: &mut ImportOptions) -> Option<&'a str> {
    let (first, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    if apply_flag(first, options) {
        return Some(tail.trim_start());
    }
    let (head, last) = rest.rsplit_once(char::is_whitespace).unwrap_or(("", rest));
    if apply_flag(last, options) {
        return Some(head.trim_end());
    }
    None
}

fn apply_flag(token: &str, options: &mut ImportOptions) -> bool {
    match token {
        "--strict" => options.strict = true,
        "--no-atomic" => options.atomic = false,
        _ => return false,
    }
    true
}

fn cmd_back(state: &mut AdminState, store: &Store) -> Outcome {
    let view = match &state.current_view {
        AdminView::Help => state.previous_view.take().unwrap_or_default(),
        _ => AdminView::Questions,
    };
    state.show(view, store).map_err(failed)?;
    Ok(None)
}

fn cmd_help(state: &mut AdminState) -> Outcome {
    if state.current_view != AdminView::Help {
        state.previous_view = Some(state.current_view.clone());
        state.current_view = AdminView::Help;
    }
    Ok(None)
}
