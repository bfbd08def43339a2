use std::ops::Range;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::{Clock, OrderMode, QuizSession};
use crate::markup::{self, HighlightLayer, RegionId};
use crate::models::{Catalog, Question, Topic, TopicRef};

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Catalog,
    Reference { topic: TopicRef, scroll: u16 },
    OrderPrompt { topic: TopicRef, choice: OrderMode },
    Quiz,
    Results { selected: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogFocus {
    #[default]
    Systems,
    Topics,
}

/// Cursor state of the disease-list browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Browser {
    pub focus: CatalogFocus,
    pub system: usize,
    pub topic: usize,
    /// `Some` while the filter box is open.
    pub filter: Option<String>,
    pub hit: usize,
}

/// Sentence cursor used while highlight mode is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightCursor {
    pub question: String,
    pub sentence: usize,
}

/// A highlightable sentence of the current explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub paragraph: usize,
    pub range: Range<usize>,
    pub paragraph_len: usize,
}

/// A quiz topic page: the session plus its page-local UI state.
pub struct QuizPage {
    pub topic: TopicRef,
    pub session: QuizSession,
    pub cursor: usize,
    pub highlights: HighlightLayer,
    highlight_mode: Option<HighlightCursor>,
}

impl QuizPage {
    fn new(topic: TopicRef, session: QuizSession) -> Self {
        Self {
            topic,
            session,
            cursor: 0,
            highlights: HighlightLayer::new(),
            highlight_mode: None,
        }
    }

    /// The highlight cursor, if highlight mode is on for the current question.
    pub fn highlight_cursor(&self) -> Option<&HighlightCursor> {
        let current = self.session.current_question()?;
        self.highlight_mode
            .as_ref()
            .filter(|cursor| cursor.question == current.id)
    }

    pub fn highlight_mode_on(&self) -> bool {
        self.highlight_cursor().is_some()
    }

    fn leave_highlight_mode(&mut self) {
        self.highlight_mode = None;
    }

    /// Called whenever the position changes.
    fn on_question_changed(&mut self) {
        self.leave_highlight_mode();
        self.sync_cursor();
    }

    /// Put the option cursor on the chosen answer, or the first option.
    fn sync_cursor(&mut self) {
        self.cursor = self
            .session
            .current_question()
            .zip(self.session.current_answer())
            .and_then(|(q, key)| q.options.iter().position(|o| o.key == key))
            .unwrap_or(0);
    }
}

/// Sentences of every explanation paragraph of `question`, in reading order.
pub fn explanation_sentences(question: &Question) -> Vec<Sentence> {
    question
        .explanation
        .iter()
        .enumerate()
        .flat_map(|(paragraph, source)| {
            let text = markup::visible_text(&markup::render(source));
            let paragraph_len = text.chars().count();
            markup::sentence_ranges(&text)
                .into_iter()
                .map(move |range| Sentence {
                    paragraph,
                    range,
                    paragraph_len,
                })
        })
        .collect()
}

pub struct App {
    pub screen: Screen,
    pub browser: Browser,
    catalog: Catalog,
    quiz: Option<QuizPage>,
    rng: StdRng,
    clock: Clock,
    should_quit: bool,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, StdRng::from_os_rng(), Clock::System)
    }

    /// Build an app with a chosen random source and clock.
    pub fn with_rng(catalog: Catalog, rng: StdRng, clock: Clock) -> Self {
        Self {
            screen: Screen::Catalog,
            browser: Browser::default(),
            catalog,
            quiz: None,
            rng,
            clock,
            should_quit: false,
        }
    }

    pub fn seeded(catalog: Catalog, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed), Clock::System)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn quiz(&self) -> Option<&QuizPage> {
        self.quiz.as_ref()
    }

    pub fn quiz_mut(&mut self) -> Option<&mut QuizPage> {
        self.quiz.as_mut()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        if let Some(page) = self.quiz.as_mut() {
            page.leave_highlight_mode();
        }
        self.should_quit = true;
    }

    pub fn topic(&self, at: TopicRef) -> Option<&Topic> {
        self.catalog.topic(at)
    }

    // ----- catalog browser -----

    /// Topics listed in the right-hand pane: filter hits while filtering,
    /// otherwise the topics of the selected system.
    pub fn listed_topics(&self) -> Vec<TopicRef> {
        match &self.browser.filter {
            Some(query) => self.catalog.search(query),
            None => {
                let system = self.browser.system;
                let count = self
                    .catalog
                    .systems
                    .get(system)
                    .map_or(0, |s| s.topics.len());
                (0..count).map(|topic| TopicRef { system, topic }).collect()
            }
        }
    }

    pub fn highlighted_topic(&self) -> Option<TopicRef> {
        let listed = self.listed_topics();
        let index = if self.browser.filter.is_some() {
            self.browser.hit
        } else {
            self.browser.topic
        };
        listed.get(index).copied()
    }

    pub fn browser_down(&mut self) {
        if self.browser.filter.is_some() {
            let len = self.listed_topics().len();
            self.browser.hit = step(self.browser.hit, len, 1);
            return;
        }
        match self.browser.focus {
            CatalogFocus::Systems => {
                let len = self.catalog.systems.len();
                self.browser.system = step(self.browser.system, len, 1);
                self.browser.topic = 0;
            }
            CatalogFocus::Topics => {
                let len = self.listed_topics().len();
                self.browser.topic = step(self.browser.topic, len, 1);
            }
        }
    }

    pub fn browser_up(&mut self) {
        if self.browser.filter.is_some() {
            let len = self.listed_topics().len();
            self.browser.hit = step(self.browser.hit, len, -1);
            return;
        }
        match self.browser.focus {
            CatalogFocus::Systems => {
                let len = self.catalog.systems.len();
                self.browser.system = step(self.browser.system, len, -1);
                self.browser.topic = 0;
            }
            CatalogFocus::Topics => {
                let len = self.listed_topics().len();
                self.browser.topic = step(self.browser.topic, len, -1);
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.browser.focus = match self.browser.focus {
            CatalogFocus::Systems => CatalogFocus::Topics,
            CatalogFocus::Topics => CatalogFocus::Systems,
        };
    }

    pub fn open_filter(&mut self) {
        self.browser.filter = Some(String::new());
        self.browser.hit = 0;
    }

    pub fn filter_push(&mut self, c: char) {
        if let Some(query) = self.browser.filter.as_mut() {
            query.push(c);
            self.browser.hit = 0;
        }
    }

    pub fn filter_pop(&mut self) {
        if let Some(query) = self.browser.filter.as_mut() {
            query.pop();
            self.browser.hit = 0;
        }
    }

    pub fn close_filter(&mut self) {
        self.browser.filter = None;
        self.browser.hit = 0;
    }

    /// Open whatever the browser points at. With focus on systems this
    /// moves focus to the topic list instead.
    pub fn open_selected(&mut self) {
        if self.browser.filter.is_none() && self.browser.focus == CatalogFocus::Systems {
            self.browser.focus = CatalogFocus::Topics;
            return;
        }
        if let Some(topic) = self.highlighted_topic() {
            self.close_filter();
            self.open_topic(topic);
        }
    }

    /// Show a topic: a reference page directly, a quiz via the order prompt.
    pub fn open_topic(&mut self, at: TopicRef) {
        let Some(topic) = self.catalog.topic(at) else {
            return;
        };
        tracing::info!(topic = %topic.id, kind = topic.kind_label(), "topic opened");

        self.browser.system = at.system;
        self.browser.topic = at.topic;
        self.browser.focus = CatalogFocus::Topics;

        self.screen = if topic.is_quiz() {
            Screen::OrderPrompt {
                topic: at,
                choice: OrderMode::Sequential,
            }
        } else {
            Screen::Reference { topic: at, scroll: 0 }
        };
    }

    /// Abandon whatever is open and return to the browser. Any session is
    /// discarded.
    pub fn back_to_catalog(&mut self) {
        if let Some(mut page) = self.quiz.take() {
            page.leave_highlight_mode();
            tracing::debug!(topic = page.topic.topic, "quiz session discarded");
        }
        self.screen = Screen::Catalog;
    }

    // ----- reference page -----

    pub fn scroll_reference(&mut self, delta: i16) {
        if let Screen::Reference { scroll, .. } = &mut self.screen {
            *scroll = scroll.saturating_add_signed(delta);
        }
    }

    // ----- order prompt -----

    pub fn toggle_order_choice(&mut self) {
        if let Screen::OrderPrompt { choice, .. } = &mut self.screen {
            *choice = match choice {
                OrderMode::Sequential => OrderMode::Random,
                OrderMode::Random => OrderMode::Sequential,
            };
        }
    }

    pub fn confirm_order_choice(&mut self) {
        if let Screen::OrderPrompt { topic, choice } = self.screen.clone() {
            self.start_quiz(topic, choice);
        }
    }

    /// Create a brand-new session for a quiz topic.
    pub fn start_quiz(&mut self, at: TopicRef, mode: OrderMode) {
        let Some(questions) = self.catalog.topic(at).and_then(Topic::questions) else {
            return;
        };

        let session = QuizSession::start(questions.to_vec(), mode, &mut self.rng, self.clock);
        self.quiz = Some(QuizPage::new(at, session));
        self.screen = Screen::Quiz;
    }

    // ----- quiz -----

    pub fn option_down(&mut self) {
        if let Some(page) = self.quiz.as_mut() {
            let len = page.session.current_question().map_or(0, |q| q.options.len());
            page.cursor = step(page.cursor, len, 1);
        }
    }

    pub fn option_up(&mut self) {
        if let Some(page) = self.quiz.as_mut() {
            let len = page.session.current_question().map_or(0, |q| q.options.len());
            page.cursor = step(page.cursor, len, -1);
        }
    }

    /// Select the option under the cursor.
    pub fn select_under_cursor(&mut self) {
        let Some(page) = self.quiz.as_mut() else {
            return;
        };
        let Some(key) = page
            .session
            .current_question()
            .and_then(|q| q.options.get(page.cursor))
            .map(|o| o.key.clone())
        else {
            return;
        };
        page.session.select(&key);
    }

    /// Select an option by its key (e.g. typed letter).
    pub fn select_key(&mut self, key: &str) {
        let Some(page) = self.quiz.as_mut() else {
            return;
        };
        if page.session.select(key) {
            page.sync_cursor();
        }
    }

    pub fn submit(&mut self) {
        if let Some(page) = self.quiz.as_mut() {
            page.session.submit();
        }
    }

    pub fn clear_answer(&mut self) {
        if let Some(page) = self.quiz.as_mut() {
            page.session.clear();
        }
    }

    pub fn next_question(&mut self) {
        if let Some(page) = self.quiz.as_mut() {
            if page.session.go_next() {
                page.on_question_changed();
            }
        }
    }

    pub fn previous_question(&mut self) {
        if let Some(page) = self.quiz.as_mut() {
            if page.session.go_previous() {
                page.on_question_changed();
            }
        }
    }

    /// End the session (if still running) and show the results.
    pub fn show_results(&mut self) {
        if let Some(page) = self.quiz.as_mut() {
            page.session.end();
            page.leave_highlight_mode();
            self.screen = Screen::Results { selected: 0 };
        }
    }

    // ----- highlight mode -----

    /// Toggle highlight mode. Only available once the explanation is visible.
    pub fn toggle_highlight_mode(&mut self) {
        let Some(page) = self.quiz.as_mut() else {
            return;
        };
        if page.highlight_mode_on() {
            page.leave_highlight_mode();
            return;
        }
        if !page.session.is_current_revealed() {
            return;
        }
        if let Some(question) = page.session.current_question() {
            page.highlight_mode = Some(HighlightCursor {
                question: question.id.clone(),
                sentence: 0,
            });
        }
    }

    pub fn move_highlight_cursor(&mut self, delta: isize) {
        let Some(page) = self.quiz.as_mut() else {
            return;
        };
        let count = page
            .session
            .current_question()
            .map_or(0, |q| explanation_sentences(q).len());
        if let Some(cursor) = page.highlight_mode.as_mut() {
            cursor.sentence = step(cursor.sentence, count, delta);
        }
    }

    /// Highlight the sentence under the cursor.
    pub fn mark_sentence(&mut self) {
        let Some(page) = self.quiz.as_mut() else {
            return;
        };
        let Some(cursor) = page.highlight_cursor().cloned() else {
            return;
        };
        let Some(question) = page.session.current_question() else {
            return;
        };
        let Some(sentence) = explanation_sentences(question).into_iter().nth(cursor.sentence)
        else {
            return;
        };

        page.highlights.add(
            RegionId::new(cursor.question, sentence.paragraph),
            sentence.range,
            sentence.paragraph_len,
        );
    }

    pub fn clear_highlights(&mut self) {
        if let Some(page) = self.quiz.as_mut() {
            page.highlights.clear_all();
        }
    }

    // ----- results -----

    pub fn results_down(&mut self) {
        let missed = self.missed_count();
        if let Screen::Results { selected } = &mut self.screen {
            *selected = step(*selected, missed, 1);
        }
    }

    pub fn results_up(&mut self) {
        let missed = self.missed_count();
        if let Screen::Results { selected } = &mut self.screen {
            *selected = step(*selected, missed, -1);
        }
    }

    fn missed_count(&self) -> usize {
        self.quiz
            .as_ref()
            .map_or(0, |page| page.session.results().missed.len())
    }

    /// Jump from the missed list back into the quiz for review. With
    /// nothing missed, review starts at the first question.
    pub fn review_selected(&mut self) {
        let Screen::Results { selected } = self.screen else {
            return;
        };
        let Some(page) = self.quiz.as_mut() else {
            return;
        };
        let position = page
            .session
            .results()
            .missed
            .get(selected)
            .map_or(0, |missed| missed.position);

        page.session.jump_to(position);
        page.on_question_changed();
        self.screen = Screen::Quiz;
    }

    /// Return to the order prompt for the same topic; the next choice
    /// starts a completely new session.
    pub fn restart(&mut self) {
        let Some(page) = self.quiz.take() else {
            return;
        };
        self.screen = Screen::OrderPrompt {
            topic: page.topic,
            choice: page.session.mode(),
        };
    }
}

fn step(current: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}
