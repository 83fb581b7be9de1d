//! Admin console renderer.

mod choices;
mod detail;
mod help;
mod questions;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{AdminState, AdminView};

const PREVIEW_LENGTH: usize = 60;

/// Render the console from the cached state.
pub fn render(frame: &mut Frame, state: &AdminState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Main content
        Constraint::Length(3), // Last message
        Constraint::Length(3), // Command input
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_main_content(frame, chunks[1], state);
    render_command_history(frame, chunks[2], state);
    render_command_input(frame, chunks[3], state);
}

/// Render the header with the view name and totals.
fn render_header(frame: &mut Frame, area: Rect, state: &AdminState) {
    let view = match &state.current_view {
        AdminView::Questions => "Questions".to_string(),
        AdminView::QuestionDetail(id) => format!("Question #{}", id),
        AdminView::Choices(filter) => format!("Choices ({})", filter.label()),
        AdminView::Help => "Help".to_string(),
    };

    let header_text = format!(
        " View: {}  |  Database: {}  |  Questions: {}  |  Choices: {}",
        view, state.database, state.question_count, state.choice_count
    );

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Green).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" MCQ Admin ")
                .title_style(Style::default().fg(Color::Cyan).bold()),
        );

    frame.render_widget(header, area);
}

/// Render the main content based on current view.
fn render_main_content(frame: &mut Frame, area: Rect, state: &AdminState) {
    match &state.current_view {
        AdminView::Questions => questions::render(frame, area, state),
        AdminView::QuestionDetail(_) => detail::render(frame, area, state),
        AdminView::Choices(filter) => choices::render(frame, area, state, *filter),
        AdminView::Help => help::render(frame, area),
    }
}

/// Render the last command message.
fn render_command_history(frame: &mut Frame, area: Rect, state: &AdminState) {
    let last_msg = state
        .command_history
        .last()
        .map(|s| s.as_str())
        .unwrap_or("");

    let color = if last_msg.starts_with("Error:") {
        Color::Red
    } else {
        Color::DarkGray
    };

    let history = Paragraph::new(last_msg)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(history, area);
}

/// Render the command input bar.
fn render_command_input(frame: &mut Frame, area: Rect, state: &AdminState) {
    let input_text = format!("> {}", state.command_input);

    let input = Paragraph::new(input_text)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(input, area);

    let cursor_x = area.x + 3 + state.command_input.chars().count() as u16;
    let cursor_y = area.y + 1;
    frame.set_cursor_position(Position::new(cursor_x, cursor_y));
}

/// Shorten text for one-line list entries.
fn preview(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > PREVIEW_LENGTH {
        let truncated: String = text.chars().take(PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn empty_hint(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", text),
        Style::default().fg(Color::DarkGray).italic(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(state: &AdminState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn preview_truncates_long_text() {
        let long = "x".repeat(PREVIEW_LENGTH + 5);
        assert_eq!(preview(&long).chars().count(), PREVIEW_LENGTH + 3);
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn question_list_shows_totals_and_rows() {
        let store = Store::open_in_memory().unwrap();
        let question = store.create_question("What is 2+2?").unwrap();
        store.create_choice(question.id, "4", true).unwrap();
        let mut state = AdminState::new("quiz.sqlite3");
        state.refresh(&store).unwrap();

        let text = screen(&state);

        assert!(text.contains("Database: quiz.sqlite3"));
        assert!(text.contains("Questions: 1"));
        assert!(text.contains("Choices: 1"));
        assert!(text.contains("What is 2+2?"));
    }

    #[test]
    fn detail_shows_blank_slots_after_choices() {
        let store = Store::open_in_memory().unwrap();
        let question = store.create_question("2+2=?").unwrap();
        store.create_choice(question.id, "3", false).unwrap();
        store.create_choice(question.id, "4", true).unwrap();
        let mut state = AdminState::new("memory");
        state
            .show(AdminView::QuestionDetail(question.id), &store)
            .unwrap();

        let text = screen(&state);

        assert!(text.contains("4 (Correct)"));
        assert!(text.contains("3 (Incorrect)"));
        assert!(text.contains("4. <blank>"));
        assert!(!text.contains("5. <blank>"));
    }
}
