//! Quiz session state machine.
//!
//! A [`QuizSession`] is one run through a question bank. It exists only
//! while a quiz is in progress or under review; "not started" is simply the
//! absence of a session. Every transition is synchronous and either applies
//! or is rejected as a no-op (returning `false`), never an error.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

use super::clock::Clock;
use super::order::{OrderMode, build_order};
use super::results::QuizResults;
use crate::models::Question;

/// Global state of a started session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Finished,
}

/// Per-question progress as seen by the progress sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus<'a> {
    Unanswered,
    Answered(&'a str),
    Revealed { chosen: &'a str, correct: bool },
}

pub struct QuizSession {
    pub(super) questions: Vec<Question>,
    mode: OrderMode,
    pub(super) order: Vec<usize>,
    pub(super) current: usize,
    /// Absent = never answered, `None` = explicitly cleared.
    answers: HashMap<String, Option<String>>,
    revealed: HashSet<String>,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    clock: Clock,
}

impl QuizSession {
    /// Start a fresh session over `questions`.
    pub fn start<R: Rng + ?Sized>(
        questions: Vec<Question>,
        mode: OrderMode,
        rng: &mut R,
        clock: Clock,
    ) -> Self {
        let order = build_order(questions.len(), mode, rng);
        tracing::info!(%mode, questions = questions.len(), "quiz session started");

        Self {
            questions,
            mode,
            order,
            current: 0,
            answers: HashMap::new(),
            revealed: HashSet::new(),
            started_at: clock.now(),
            ended_at: None,
            clock,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Current position in the working order (0-based).
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn question_at(&self, position: usize) -> Option<&Question> {
        self.order
            .get(position)
            .and_then(|&index| self.questions.get(index))
    }

    /// `None` only when the bank is empty.
    pub fn current_question(&self) -> Option<&Question> {
        self.question_at(self.current)
    }

    /// The chosen key for a question, if any.
    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers
            .get(question_id)
            .and_then(|choice| choice.as_deref())
    }

    pub fn current_answer(&self) -> Option<&str> {
        self.current_question().and_then(|q| self.answer(&q.id))
    }

    pub fn answers(&self) -> &HashMap<String, Option<String>> {
        &self.answers
    }

    pub fn is_revealed(&self, question_id: &str) -> bool {
        self.revealed.contains(question_id)
    }

    pub fn is_current_revealed(&self) -> bool {
        self.current_question()
            .is_some_and(|q| self.revealed.contains(&q.id))
    }

    pub fn status_at(&self, position: usize) -> Option<QuestionStatus<'_>> {
        let question = self.question_at(position)?;
        let status = match self.answer(&question.id) {
            Some(chosen) if self.is_revealed(&question.id) => QuestionStatus::Revealed {
                chosen,
                correct: question.is_correct(chosen),
            },
            Some(chosen) => QuestionStatus::Answered(chosen),
            None => QuestionStatus::Unanswered,
        };
        Some(status)
    }

    /// Status of every question, in working order.
    pub fn statuses(&self) -> Vec<QuestionStatus<'_>> {
        (0..self.len()).filter_map(|p| self.status_at(p)).collect()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Choose `key` for the current question. Rejected once the question is
    /// revealed or when `key` is not one of its options.
    pub fn select(&mut self, key: &str) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        if self.revealed.contains(&question.id) {
            tracing::debug!(question = %question.id, "select rejected: already revealed");
            return false;
        }
        if !question.has_option(key) {
            tracing::debug!(question = %question.id, key, "select rejected: unknown option");
            return false;
        }

        let id = question.id.clone();
        self.answers.insert(id, Some(key.to_string()));
        true
    }

    /// Drop the current selection. Rejected once revealed, or when nothing
    /// is selected.
    pub fn clear(&mut self) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        if self.revealed.contains(&question.id) {
            tracing::debug!(question = %question.id, "clear rejected: already revealed");
            return false;
        }
        if self.answer(&question.id).is_none() {
            tracing::debug!(question = %question.id, "clear rejected: nothing selected");
            return false;
        }

        let id = question.id.clone();
        self.answers.insert(id, None);
        true
    }

    /// Reveal the current question. Requires a selection; irreversible.
    pub fn submit(&mut self) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        if self.revealed.contains(&question.id) {
            return false;
        }
        let Some(chosen) = self.answer(&question.id) else {
            tracing::debug!(question = %question.id, "submit rejected: nothing selected");
            return false;
        };

        let correct = question.is_correct(chosen);
        let id = question.id.clone();
        tracing::debug!(question = %id, correct, "answer revealed");

        self.revealed.insert(id);
        self.refresh_finished();
        true
    }

    /// End the session explicitly. Idempotent.
    pub fn end(&mut self) {
        self.mark_finished();
    }

    pub fn status(&self) -> SessionStatus {
        if self.ended_at.is_some() {
            SessionStatus::Finished
        } else {
            SessionStatus::InProgress
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status() == SessionStatus::Finished
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Time spent so far, frozen once the session has finished. Never negative.
    pub fn elapsed(&self) -> TimeDelta {
        let until = self.ended_at.unwrap_or_else(|| self.clock.now());
        (until - self.started_at).max(TimeDelta::zero())
    }

    pub fn results(&self) -> QuizResults<'_> {
        QuizResults::compute(&self.questions, &self.order, &self.answers, self.elapsed())
    }

    /// Access to the session clock, e.g. to advance a fixed clock.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Finish once the last position is reached and revealed.
    pub(super) fn refresh_finished(&mut self) {
        let at_last = !self.order.is_empty() && self.current + 1 == self.order.len();
        if at_last && self.is_current_revealed() {
            self.mark_finished();
        }
    }

    fn mark_finished(&mut self) {
        if self.ended_at.is_some() {
            return;
        }
        self.ended_at = Some(self.clock.now());

        let results = self.results();
        tracing::info!(
            score = results.score,
            total = results.total,
            percentage = results.percentage,
            "quiz session finished"
        );
    }
}
