use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::admin::state::AdminState;

use super::{empty_hint, preview};

/// Question list, newest first.
pub fn render(frame: &mut Frame, area: Rect, state: &AdminState) {
    let title = match &state.search {
        Some(term) => format!(" Questions matching '{}' ", term),
        None => " Questions ".to_string(),
    };

    let lines: Vec<Line> = if state.questions.is_empty() {
        let hint = match &state.search {
            Some(_) => "No question matches. Type 'list' to clear the search.",
            None => "No questions yet. Try 'add <text>' or 'import <path>'.",
        };
        vec![empty_hint(hint)]
    } else {
        state
            .questions
            .iter()
            .map(|question| {
                Line::from(vec![
                    Span::styled(
                        format!("#{:<6}", question.id),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::styled(
                        format!("{}  ", question.created_at.format("%Y-%m-%d %H:%M")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(preview(&question.text), Style::default().fg(Color::White)),
                ])
            })
            .collect()
    };

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title)
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((state.scroll as u16, 0));

    frame.render_widget(widget, area);
}
