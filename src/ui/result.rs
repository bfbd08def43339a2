use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::engine::QuizResults;
use crate::markup;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App, selected: usize) {
    let Some(page) = app.quiz() else {
        return;
    };
    let results = page.session.results();
    let title = app.topic(page.topic).map_or("", |t| t.title.as_str());

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], &results, title);
    render_missed(frame, chunks[2], &results, selected);
    render_controls(frame, chunks[3], !results.missed.is_empty());
}

fn get_grade_color(percentage: u32) -> Color {
    match percentage {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, results: &QuizResults<'_>, title: &str) {
    let grade_color = get_grade_color(results.percentage);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} · RESULTS", title.to_uppercase()),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}%)",
                results.score, results.total, results.percentage
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(
            format!(
                "time {}  ·  {} answered  ·  {} unanswered",
                results.elapsed,
                results.answered,
                results.unanswered()
            )
            .fg(Color::DarkGray),
        ),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_missed(frame: &mut Frame, area: Rect, results: &QuizResults<'_>, selected: usize) {
    let lines: Vec<Line> = if results.missed.is_empty() {
        vec![Line::from(
            "No missed questions.".fg(Color::Green),
        )]
    } else {
        results
            .missed
            .iter()
            .enumerate()
            .map(|(index, missed)| {
                let is_selected = index == selected;
                let marker = if is_selected { ">" } else { " " };
                let text_style = if is_selected {
                    Style::default().fg(Color::Yellow).bold()
                } else {
                    Style::default().fg(Color::Gray)
                };
                let stem = markup::visible_text(&markup::render(&missed.question.stem));

                Line::from(vec![
                    Span::styled(format!(" {} ", marker), Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!("{:2}. ", missed.display_index),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(super::truncate(&stem, QUESTION_PREVIEW_LENGTH), text_style),
                    Span::styled(
                        format!("  you {} · answer {}", missed.chosen_key, missed.question.correct),
                        Style::default().fg(Color::Red),
                    ),
                ])
            })
            .collect()
    };

    let scroll = selected.saturating_sub(area.height.saturating_sub(3) as usize);
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Missed ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, can_review: bool) {
    let text = if can_review {
        "j/k select  ·  enter review  ·  r restart  ·  esc catalog  ·  q quit"
    } else {
        "enter review from start  ·  r restart  ·  esc catalog  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_bands() {
        assert_eq!(get_grade_color(100), Color::Green);
        assert_eq!(get_grade_color(75), Color::Cyan);
        assert_eq!(get_grade_color(50), Color::Yellow);
        assert_eq!(get_grade_color(40), Color::Red);
    }
}
