//! # mediwise
//!
//! A terminal medical-education reference and MCQ practice application.
//!
//! Topics are grouped by organ system. Each one is either a static reference
//! page or a question bank run by the shared quiz session engine
//! ([`engine::QuizSession`]).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mediwise::{Mediwise, MediwiseError};
//!
//! fn main() -> Result<(), MediwiseError> {
//!     // Load the catalog from a JSON file
//!     let app = Mediwise::from_json("data/catalog.json")?;
//!
//!     // Run the browser and quizzes in the terminal
//!     app.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
mod data;
pub mod engine;
pub mod markup;
mod models;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::{App, Browser, CatalogFocus, QuizPage, Screen};
pub use config::Config;
pub use data::{LoadError, load_catalog_from_json, parse_catalog};
pub use models::{
    AnswerOption, Catalog, Difficulty, OrganSystem, Question, ReferencePage, Topic, TopicContent,
    TopicRef,
};

/// How often the screen is redrawn while idle, to keep the timer moving.
const TICK: Duration = Duration::from_millis(250);

/// Error type for application start-up and the terminal loop.
#[derive(Debug, Error)]
pub enum MediwiseError {
    #[error("failed to load catalog: {0}")]
    Load(#[from] LoadError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no topic with id `{0}` in the catalog")]
    UnknownTopic(String),
}

/// A catalog plus the app state that browses it in the terminal.
pub struct Mediwise {
    app: App,
}

impl Mediwise {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            app: App::new(catalog),
        }
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use mediwise::Mediwise;
    ///
    /// let app = Mediwise::from_json("data/catalog.json").expect("Failed to load catalog");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, MediwiseError> {
        let catalog = load_catalog_from_json(path)?;
        Ok(Self::new(catalog))
    }

    /// Build from parsed configuration: catalog path, seed, and optional
    /// topic to open straight away.
    pub fn from_config(config: &Config) -> Result<Self, MediwiseError> {
        let catalog = load_catalog_from_json(&config.catalog)?;
        let mut app = match config.seed {
            Some(seed) => App::seeded(catalog, seed),
            None => App::new(catalog),
        };

        if let Some(id) = &config.topic {
            let at = app
                .catalog()
                .find_topic(id)
                .ok_or_else(|| MediwiseError::UnknownTopic(id.clone()))?;
            app.open_topic(at);

            let is_quiz = app.topic(at).is_some_and(Topic::is_quiz);
            if let (true, Some(mode)) = (is_quiz, config.order_mode()) {
                app.start_quiz(at, mode);
            }
        }

        Ok(Self { app })
    }

    /// Run in the terminal until the user quits.
    pub fn run(mut self) -> Result<(), MediwiseError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), MediwiseError> {
    while !app.should_quit() {
        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_input(app, key.code);
        }
    }

    Ok(())
}

/// Apply one key press to the app.
pub fn handle_input(app: &mut App, key: KeyCode) {
    match app.screen {
        Screen::Catalog => handle_catalog_input(app, key),
        Screen::Reference { .. } => handle_reference_input(app, key),
        Screen::OrderPrompt { .. } => handle_order_input(app, key),
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Results { .. } => handle_result_input(app, key),
    }
}

fn handle_catalog_input(app: &mut App, key: KeyCode) {
    if app.browser.filter.is_some() {
        match key {
            KeyCode::Esc => app.close_filter(),
            KeyCode::Enter => app.open_selected(),
            KeyCode::Backspace => app.filter_pop(),
            KeyCode::Down => app.browser_down(),
            KeyCode::Up => app.browser_up(),
            KeyCode::Char(c) => app.filter_push(c),
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Down | KeyCode::Char('j') => app.browser_down(),
        KeyCode::Up | KeyCode::Char('k') => app.browser_up(),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => app.toggle_focus(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('/') => app.open_filter(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn handle_reference_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_reference(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_reference(-1),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.back_to_catalog(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn handle_order_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Up | KeyCode::Char('j') | KeyCode::Char('k') => {
            app.toggle_order_choice()
        }
        KeyCode::Enter => app.confirm_order_choice(),
        KeyCode::Char('s') => {
            if let Screen::OrderPrompt { topic, .. } = app.screen {
                app.start_quiz(topic, engine::OrderMode::Sequential);
            }
        }
        KeyCode::Char('r') => {
            if let Screen::OrderPrompt { topic, .. } = app.screen {
                app.start_quiz(topic, engine::OrderMode::Random);
            }
        }
        KeyCode::Esc | KeyCode::Backspace => app.back_to_catalog(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) {
    let highlighting = app.quiz().is_some_and(QuizPage::highlight_mode_on);
    if highlighting {
        match key {
            KeyCode::Char('[') | KeyCode::Up | KeyCode::Char('k') => app.move_highlight_cursor(-1),
            KeyCode::Char(']') | KeyCode::Down | KeyCode::Char('j') => app.move_highlight_cursor(1),
            KeyCode::Char('m') | KeyCode::Enter => app.mark_sentence(),
            KeyCode::Char('x') => app.clear_highlights(),
            KeyCode::Char('h') | KeyCode::Esc => app.toggle_highlight_mode(),
            KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Down | KeyCode::Char('j') => app.option_down(),
        KeyCode::Up | KeyCode::Char('k') => app.option_up(),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_under_cursor(),
        KeyCode::Char('s') => app.submit(),
        KeyCode::Char('c') => app.clear_answer(),
        KeyCode::Right | KeyCode::Char('n') => app.next_question(),
        KeyCode::Left | KeyCode::Char('p') => app.previous_question(),
        KeyCode::Char('h') => app.toggle_highlight_mode(),
        KeyCode::Char('e') => app.show_results(),
        KeyCode::Char(c @ 'A'..='E') => app.select_key(&c.to_string()),
        KeyCode::Esc => app.back_to_catalog(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.results_up(),
        KeyCode::Enter => app.review_selected(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Esc => app.back_to_catalog(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}
