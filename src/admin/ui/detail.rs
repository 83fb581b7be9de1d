//! One question with its choices edited inline.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::admin::state::{AdminState, INLINE_EXTRA};

pub fn render(frame: &mut Frame, area: Rect, state: &AdminState) {
    let Some(detail) = state.open_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(4), // Question text
        Constraint::Min(4),    // Choice slots
        Constraint::Length(2), // Instructions
    ])
    .margin(1)
    .split(area);

    let question = Paragraph::new(vec![
        Line::from(Span::styled(
            detail.question.text.as_str(),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            format!(
                "Created {}",
                detail.question.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .title(format!(" Question #{} ", detail.question.id))
            .title_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(question, chunks[0]);

    let mut lines: Vec<Line> = detail
        .choices
        .iter()
        .enumerate()
        .map(|(index, choice)| {
            let (marker, color) = if choice.is_correct {
                ("[x]", Color::Green)
            } else {
                ("[ ]", Color::Gray)
            };
            Line::from(vec![
                Span::styled(format!("{:2}. ", index + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{} ", marker), Style::default().fg(color)),
                Span::styled(choice.to_string(), Style::default().fg(color)),
            ])
        })
        .collect();

    let first_blank = detail.choices.len() + 1;
    for slot in first_blank..first_blank + INLINE_EXTRA {
        lines.push(Line::from(Span::styled(
            format!("{:2}. <blank>", slot),
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let slots = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((state.scroll as u16, 0));
    frame.render_widget(slots, chunks[1]);

    let instructions = Paragraph::new(
        "choice <slot> <text>  ·  correct/incorrect <slot>  ·  remove <slot>  ·  edit <text>  ·  delete",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(instructions, chunks[2]);
}
