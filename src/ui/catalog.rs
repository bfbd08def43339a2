//! Disease-list browser: organ systems on the left, topics on the right.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
};

use crate::app::{App, CatalogFocus};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);

    let panes = Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);
    render_systems(frame, panes[0], app);
    render_topics(frame, panes[1], app);

    render_filter(frame, chunks[2], app);
    render_controls(frame, chunks[3], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let catalog = app.catalog();
    let content = vec![
        Line::from(Span::styled(
            catalog.title.to_uppercase(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(
            format!(
                "{} systems · {} topics",
                catalog.systems.len(),
                catalog.topic_count()
            )
            .fg(Color::DarkGray),
        ),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1))
}

fn render_systems(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .catalog()
        .systems
        .iter()
        .map(|system| {
            ListItem::new(Line::from(vec![
                Span::raw(system.name.clone()),
                Span::styled(
                    format!("  {}", system.topics.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let focused = app.browser.filter.is_none() && app.browser.focus == CatalogFocus::Systems;
    let list = List::new(items)
        .block(pane_block("Systems", focused))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.browser.system));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_topics(frame: &mut Frame, area: Rect, app: &App) {
    let filtering = app.browser.filter.is_some();
    let items: Vec<ListItem> = app
        .listed_topics()
        .into_iter()
        .filter_map(|at| {
            let topic = app.topic(at)?;
            let kind_color = if topic.is_quiz() {
                Color::Green
            } else {
                Color::Blue
            };
            let mut spans = vec![
                Span::raw(topic.title.clone()),
                Span::styled(
                    format!("  [{}]", topic.kind_label()),
                    Style::default().fg(kind_color),
                ),
            ];
            if filtering {
                let system = &app.catalog().systems[at.system];
                spans.push(Span::styled(
                    format!("  {}", system.name),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Some(ListItem::new(Line::from(spans)))
        })
        .collect();

    let title = if filtering { "Matches" } else { "Topics" };
    let focused = filtering || app.browser.focus == CatalogFocus::Topics;
    let selected = if filtering {
        app.browser.hit
    } else {
        app.browser.topic
    };

    let list = List::new(items)
        .block(pane_block(title, focused))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(focused.then_some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_filter(frame: &mut Frame, area: Rect, app: &App) {
    let Some(query) = &app.browser.filter else {
        return;
    };
    let widget = Paragraph::new(Line::from(vec![
        Span::styled(" / ", Style::default().fg(Color::Yellow).bold()),
        Span::raw(query.clone()),
        Span::styled("_", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let text = if app.browser.filter.is_some() {
        "type to filter  ·  ↑/↓ move  ·  enter open  ·  esc cancel"
    } else {
        "j/k move  ·  tab switch pane  ·  enter open  ·  / filter  ·  q quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
