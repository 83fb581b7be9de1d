//! Help view for the console.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

const COMMANDS: &[(&str, &str)] = &[
    ("list", "Show all questions, newest first"),
    ("search <words>", "Questions containing every word"),
    ("add <text>", "Create a question and open it"),
    ("open <id>", "Show a question with its choice slots"),
    ("edit <text>", "Replace the open question's text"),
    ("delete [<id>]", "Delete a question and all its choices"),
    ("choice <slot> <text>", "Set a choice; blank slots add one"),
    ("correct <slot>", "Mark a choice correct"),
    ("incorrect <slot>", "Mark a choice incorrect"),
    ("remove <slot>", "Delete a choice"),
    ("choices [filter]", "List choices: all, correct or incorrect"),
    ("import <path>", "Load a spreadsheet (--strict, --no-atomic)"),
    ("back", "Return to the question list"),
    ("help / ?", "Show this help"),
    ("quit / exit", "Leave the console"),
];

pub fn render(frame: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "AVAILABLE COMMANDS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    help_text.extend(COMMANDS.iter().map(|(command, description)| {
        Line::from(vec![
            Span::styled(format!("  {:<24}", command), Style::default().fg(Color::Yellow)),
            Span::raw(*description),
        ])
    }));

    help_text.extend([
        Line::from(""),
        Line::from(Span::styled(
            "Tab switches lists  ·  Up/Down scroll  ·  Esc or Enter closes help",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let widget = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Help ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(2)),
    );

    frame.render_widget(widget, area);
}
