mod catalog;
mod order_prompt;
mod quiz;
mod reference;
mod result;
pub mod rich;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.screen {
        Screen::Catalog => catalog::render(frame, area, app),
        Screen::Reference { topic, scroll } => reference::render(frame, area, app, *topic, *scroll),
        Screen::OrderPrompt { topic, choice } => {
            order_prompt::render(frame, area, app, *topic, *choice)
        }
        Screen::Quiz => quiz::render(frame, area, app),
        Screen::Results { selected } => result::render(frame, area, app, *selected),
    }
}

/// Shorten `text` to at most `max` characters, adding an ellipsis.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let truncated: String = text.chars().take(max).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::data::parse_catalog;
    use crate::engine::{OrderMode, fixed_clock};
    use crate::models::TopicRef;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const CATALOG: &str = r#"{
        "title": "Mediwise",
        "systems": [{"id": "geri", "name": "Geriatrics", "topics": [
            {"id": "frailty", "title": "Frailty", "kind": "reference",
             "page": {"presentations": ["Falls, **immobility**"], "red_flags": ["<script>x</script>"]}},
            {"id": "delirium", "title": "Delirium", "kind": "quiz", "questions": [
                {"id": "d1", "stem": "Most common **subtype**?", "correct": "B",
                 "options": [{"key": "A", "text": "Hyperactive"}, {"key": "B", "text": "Hypoactive"}],
                 "explanation": ["==Hypoactive== is most common."]}
            ]}
        ]}]
    }"#;

    fn app() -> App {
        App::with_rng(
            parse_catalog(CATALOG).unwrap(),
            StdRng::seed_from_u64(3),
            fixed_clock(),
        )
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let area = buffer.area;

        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn catalog_screen_lists_systems_and_topics() {
        let screen = draw(&app());
        assert!(screen.contains("Geriatrics"));
        assert!(screen.contains("Frailty"));
        assert!(screen.contains("Delirium"));
    }

    #[test]
    fn reference_page_shows_sections_without_markers() {
        let mut app = app();
        app.open_topic(TopicRef { system: 0, topic: 0 });

        let screen = draw(&app);
        assert!(screen.contains("PRESENTATIONS"));
        assert!(screen.contains("Falls, immobility"));
        assert!(screen.contains("<script>x</script>"));
        assert!(!screen.contains("**"));
    }

    #[test]
    fn order_prompt_offers_both_modes() {
        let mut app = app();
        app.open_topic(TopicRef { system: 0, topic: 1 });

        let screen = draw(&app);
        assert!(screen.contains("Sequential"));
        assert!(screen.contains("Random"));
    }

    #[test]
    fn quiz_and_results_screens_render() {
        let mut app = app();
        app.start_quiz(TopicRef { system: 0, topic: 1 }, OrderMode::Sequential);

        let screen = draw(&app);
        assert!(screen.contains("Question 1 of 1"));
        assert!(screen.contains("Most common subtype?"));
        assert!(!screen.contains("is most common."), "explanation hidden before reveal");

        app.select_under_cursor();
        app.submit();
        let screen = draw(&app);
        assert!(screen.contains("Hypoactive is most common."));

        app.show_results();
        let screen = draw(&app);
        assert!(screen.contains("0 / 1"));
        assert!(screen.contains("Most common subtype?"));
    }

    #[test]
    fn truncate_adds_ellipsis_only_when_needed() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
