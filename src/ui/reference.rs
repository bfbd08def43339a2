//! Static reference page of a topic.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use super::rich;
use crate::app::App;
use crate::models::{TopicContent, TopicRef};

pub fn render(frame: &mut Frame, area: Rect, app: &App, at: TopicRef, scroll: u16) {
    let Some(topic) = app.topic(at) else {
        return;
    };
    let TopicContent::Reference { page } = &topic.content else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let system = &app.catalog().systems[at.system].name;
    let title = Line::from(vec![
        Span::styled(topic.title.clone(), Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("  ·  {}", system), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(summary) = &topic.summary {
        lines.push(rich::line(summary, Style::default().fg(Color::Gray).italic()));
        lines.push(Line::from(""));
    }

    for (heading, entries) in page.sections() {
        let heading_color = if heading == "Red flags" {
            Color::Red
        } else {
            Color::Cyan
        };
        lines.push(Line::from(Span::styled(
            heading.to_uppercase(),
            Style::default().fg(heading_color).bold(),
        )));
        for entry in entries {
            let mut spans = vec![Span::styled(" • ", Style::default().fg(Color::DarkGray))];
            spans.extend(rich::spans(entry, Style::default().fg(Color::White)));
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Color::DarkGray)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, chunks[1]);

    let controls = Paragraph::new("j/k scroll  ·  esc back  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[2]);
}
