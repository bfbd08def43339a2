use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::engine::OrderMode;
use crate::models::TopicRef;

pub fn render(frame: &mut Frame, area: Rect, app: &App, at: TopicRef, choice: OrderMode) {
    let Some(topic) = app.topic(at) else {
        return;
    };
    let count = topic.questions().map_or(0, <[_]>::len);

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(12),
        Constraint::Fill(1),
    ])
    .split(area);
    let column = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(50),
        Constraint::Fill(1),
    ])
    .split(chunks[1]);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            topic.title.to_uppercase(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(format!("{} questions", count).fg(Color::DarkGray)),
        Line::from(""),
        Line::from("How should questions be ordered?".fg(Color::Gray)),
        Line::from(""),
    ];
    for (mode, label) in [
        (OrderMode::Sequential, "Sequential"),
        (OrderMode::Random, "Random"),
    ] {
        let selected = mode == choice;
        let style = if selected {
            Style::default().fg(Color::Green).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if selected { "> " } else { "  " };
        content.push(Line::from(Span::styled(format!("{}{}", marker, label), style)));
    }
    content.push(Line::from(""));
    content.push(Line::from(
        "j/k choose  ·  s/r shortcut  ·  enter start  ·  esc back".fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, column[1]);
}
