use std::collections::HashMap;
use std::fmt;

use chrono::TimeDelta;

use crate::models::Question;

/// Elapsed time split into whole minutes and remaining seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub minutes: i64,
    pub seconds: i64,
}

impl Elapsed {
    pub fn from_delta(delta: TimeDelta) -> Self {
        let total = delta.num_seconds().max(0);
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// An answered-but-wrong question, listed for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissedQuestion<'a> {
    /// 0-based position in the working order; use for jumping back.
    pub position: usize,
    /// 1-based number as shown to the user.
    pub display_index: usize,
    pub question: &'a Question,
    pub chosen_key: &'a str,
}

/// Summary of a session. Always recomputed from session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults<'a> {
    pub score: usize,
    pub total: usize,
    pub answered: usize,
    pub percentage: u32,
    pub elapsed: Elapsed,
    pub missed: Vec<MissedQuestion<'a>>,
}

impl<'a> QuizResults<'a> {
    pub fn compute(
        questions: &'a [Question],
        order: &[usize],
        answers: &'a HashMap<String, Option<String>>,
        elapsed: TimeDelta,
    ) -> Self {
        let mut score = 0;
        let mut answered = 0;
        let mut missed = Vec::new();

        for (position, question) in order
            .iter()
            .enumerate()
            .filter_map(|(position, &index)| Some((position, questions.get(index)?)))
        {
            let Some(chosen) = answers.get(&question.id).and_then(|c| c.as_deref()) else {
                continue;
            };
            answered += 1;

            if question.is_correct(chosen) {
                score += 1;
            } else {
                missed.push(MissedQuestion {
                    position,
                    display_index: position + 1,
                    question,
                    chosen_key: chosen,
                });
            }
        }

        let total = order.len();
        Self {
            score,
            total,
            answered,
            percentage: percentage(score, total),
            elapsed: Elapsed::from_delta(elapsed),
            missed,
        }
    }

    pub fn unanswered(&self) -> usize {
        self.total - self.answered
    }
}

fn percentage(score: usize, total: usize) -> u32 {
    (100.0 * score as f64 / total.max(1) as f64).round() as u32
}
