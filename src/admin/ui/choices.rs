use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Tabs};

use crate::admin::state::{AdminState, ChoiceFilter};

use super::{empty_hint, preview};

/// Every choice with its question, filtered by correctness.
pub fn render(frame: &mut Frame, area: Rect, state: &AdminState, filter: ChoiceFilter) {
    let chunks = Layout::vertical([
        Constraint::Length(2), // Filter tabs
        Constraint::Min(3),    // Choice list
    ])
    .split(area);

    let selected = ChoiceFilter::ALL
        .iter()
        .position(|candidate| *candidate == filter)
        .unwrap_or(0);
    let tabs = Tabs::new(ChoiceFilter::ALL.iter().map(|f| f.label()))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(tabs, chunks[0]);

    let lines: Vec<Line> = if state.choices.is_empty() {
        vec![empty_hint("No choices to show.")]
    } else {
        state
            .choices
            .iter()
            .map(|listing| {
                let color = if listing.choice.is_correct {
                    Color::Green
                } else {
                    Color::Gray
                };
                Line::from(vec![
                    Span::styled(
                        format!("#{:<6}", listing.choice.id),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::styled(listing.choice.to_string(), Style::default().fg(color)),
                    Span::styled(
                        format!("  <- #{} {}", listing.choice.question_id, preview(&listing.question_text)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    };

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Choices ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((state.scroll as u16, 0));

    frame.render_widget(widget, chunks[1]);
}
