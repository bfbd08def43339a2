use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use super::rich;
use crate::app::{App, QuizPage, explanation_sentences};
use crate::engine::{Elapsed, QuestionStatus};
use crate::markup::RegionId;
use crate::models::Question;

const SIDEBAR_WIDTH: u16 = 14;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(page) = app.quiz() else {
        return;
    };

    let columns = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
        .margin(1)
        .split(area);
    render_sidebar(frame, columns[0], page);

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(columns[1]);

    let title = app.topic(page.topic).map_or("", |t| t.title.as_str());
    render_progress(frame, chunks[0], page, title);

    match page.session.current_question() {
        Some(question) => render_question(frame, chunks[1], page, question),
        None => {
            let empty = Paragraph::new("This topic has no questions yet.")
                .alignment(Alignment::Center)
                .fg(Color::Yellow);
            frame.render_widget(empty, chunks[1]);
        }
    }

    render_controls(frame, chunks[2], page);
}

fn render_sidebar(frame: &mut Frame, area: Rect, page: &QuizPage) {
    let current = page.session.position();
    let lines: Vec<Line> = page
        .session
        .statuses()
        .into_iter()
        .enumerate()
        .map(|(position, status)| {
            let (symbol, color) = match status {
                QuestionStatus::Unanswered => ("·", Color::DarkGray),
                QuestionStatus::Answered(_) => ("○", Color::Yellow),
                QuestionStatus::Revealed { correct: true, .. } => ("+", Color::Green),
                QuestionStatus::Revealed { correct: false, .. } => ("-", Color::Red),
            };
            let marker = if position == current { ">" } else { " " };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan).bold()),
                Span::styled(
                    format!("{:3} ", position + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(symbol, Style::default().fg(color)),
            ])
        })
        .collect();

    let scroll = current.saturating_sub(area.height.saturating_sub(3) as usize / 2);
    let widget = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, area: Rect, page: &QuizPage, title: &str) {
    let session = &page.session;
    let status = if session.is_finished() {
        Span::styled("  FINISHED", Style::default().fg(Color::Green).bold())
    } else {
        Span::raw("")
    };
    let elapsed = Elapsed::from_delta(session.elapsed());
    let number = if session.is_empty() {
        0
    } else {
        session.position() + 1
    };

    let left = Line::from(vec![
        Span::styled(format!(" {}", title), Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("  ·  Question {} of {}", number, session.len()),
            Style::default().fg(Color::White),
        ),
        status,
    ]);
    let right = Line::from(format!("{} ({}) ", elapsed, session.mode())).fg(Color::DarkGray);

    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Length(22)]).split(area);
    frame.render_widget(Paragraph::new(left), halves[0]);
    frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), halves[1]);
}

fn render_question(frame: &mut Frame, area: Rect, page: &QuizPage, question: &Question) {
    let session = &page.session;
    let revealed = session.is_revealed(&question.id);
    let chosen = session.answer(&question.id);

    let mut lines: Vec<Line> = Vec::new();

    if let Some(vignette) = &question.vignette_title {
        lines.push(Line::from(Span::styled(
            vignette.clone(),
            Style::default().fg(Color::Gray).italic(),
        )));
    }
    let mut meta = Vec::new();
    if let Some(difficulty) = question.difficulty {
        meta.push(difficulty.label().to_string());
    }
    if let Some(topic) = &question.topic {
        meta.push(topic.clone());
    }
    if let Some(image) = &question.image {
        meta.push(format!("image: {}", image));
    }
    if !meta.is_empty() {
        lines.push(Line::from(meta.join("  ·  ").fg(Color::DarkGray)));
    }

    lines.push(rich::line(
        &question.stem,
        Style::default().fg(Color::White).bold(),
    ));
    lines.push(Line::from(""));

    for (index, option) in question.options.iter().enumerate() {
        let is_cursor = index == page.cursor && !revealed;
        let is_chosen = chosen == Some(option.key.as_str());
        let is_correct = question.is_correct(&option.key);

        let style = match (revealed, is_chosen, is_correct) {
            (true, _, true) => Style::default().fg(Color::Green).bold(),
            (true, true, false) => Style::default().fg(Color::Red).bold(),
            (true, false, false) => Style::default().fg(Color::DarkGray),
            (false, true, _) => Style::default().fg(Color::Cyan).bold(),
            (false, false, _) if is_cursor => Style::default().fg(Color::Yellow),
            (false, false, _) => Style::default().fg(Color::Gray),
        };
        let marker = if is_cursor { ">" } else { " " };
        let choice = if is_chosen { "●" } else { "○" };

        let mut spans = vec![
            Span::styled(format!(" {} {} ", marker, choice), style),
            Span::styled(format!("{}. ", option.key), style),
        ];
        spans.extend(rich::spans(&option.text, style));
        lines.push(Line::from(spans));
    }

    if revealed {
        lines.push(Line::from(""));
        lines.extend(explanation_lines(page, question));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::new(2, 1, 1, 0)),
    );
    frame.render_widget(widget, area);
}

fn explanation_lines(page: &QuizPage, question: &Question) -> Vec<Line<'static>> {
    let heading_style = if page.highlight_mode_on() {
        Style::default().fg(Color::Black).bg(Color::LightCyan).bold()
    } else {
        Style::default().fg(Color::Cyan).bold()
    };
    let heading = if page.highlight_mode_on() {
        " EXPLANATION · highlight mode "
    } else {
        "EXPLANATION"
    };
    let mut lines = vec![Line::from(Span::styled(heading, heading_style))];

    let cursor = page
        .highlight_cursor()
        .and_then(|c| explanation_sentences(question).into_iter().nth(c.sentence));

    for (paragraph, source) in question.explanation.iter().enumerate() {
        let annotations = page.highlights.get(&RegionId::new(question.id.as_str(), paragraph));
        let cursor_range = cursor
            .as_ref()
            .filter(|s| s.paragraph == paragraph)
            .map(|s| s.range.clone());

        lines.push(Line::from(rich::annotated_spans(
            source,
            Style::default().fg(Color::White),
            annotations,
            cursor_range,
        )));
    }
    lines
}

fn render_controls(frame: &mut Frame, area: Rect, page: &QuizPage) {
    let session = &page.session;
    let text = if page.highlight_mode_on() {
        "[/] sentence  ·  m mark  ·  x clear all  ·  h done"
    } else if session.is_current_revealed() {
        "←/→ prev/next  ·  h highlight  ·  e results  ·  esc catalog"
    } else {
        "j/k move  ·  enter choose  ·  s submit  ·  c clear  ·  ←/→ prev/next  ·  e end"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
