//! Moving between questions of a session. All moves clamp to the bank
//! bounds and never touch answer or reveal state.

use super::session::QuizSession;

impl QuizSession {
    /// Whether [`QuizSession::go_next`] would move. While in progress the
    /// current question must be revealed first; after finishing, review
    /// is unrestricted.
    pub fn can_go_next(&self) -> bool {
        let has_next = self.current + 1 < self.order.len();
        has_next && (self.is_finished() || self.is_current_revealed())
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub fn go_next(&mut self) -> bool {
        if !self.can_go_next() {
            tracing::debug!(position = self.current, "next rejected");
            return false;
        }
        self.current += 1;
        self.refresh_finished();
        true
    }

    pub fn go_previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Move straight to `position`, clamped to the last question.
    pub fn jump_to(&mut self, position: usize) -> bool {
        let Some(last) = self.order.len().checked_sub(1) else {
            return false;
        };
        let target = position.min(last);
        if target == self.current {
            return false;
        }
        self.current = target;
        self.refresh_finished();
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::engine::clock::fixed_clock;
    use crate::engine::order::OrderMode;
    use crate::engine::session::QuizSession;
    use crate::engine::session::tests::bank;

    fn session(len: usize) -> QuizSession {
        QuizSession::start(
            bank(len),
            OrderMode::Sequential,
            &mut StdRng::seed_from_u64(0),
            fixed_clock(),
        )
    }

    fn reveal_current(s: &mut QuizSession) {
        assert!(s.select("A"));
        assert!(s.submit());
    }

    #[test]
    fn previous_at_first_position_stays_put() {
        let mut s = session(3);
        assert!(!s.go_previous());
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn next_at_last_position_stays_put() {
        let mut s = session(2);
        s.jump_to(1);
        reveal_current(&mut s);

        assert!(!s.go_next());
        assert_eq!(s.position(), 1);
    }

    #[test]
    fn next_requires_reveal_while_in_progress() {
        let mut s = session(3);

        assert!(!s.go_next());
        s.select("B");
        assert!(!s.go_next(), "a selection alone does not unlock next");

        s.submit();
        assert!(s.go_next());
        assert_eq!(s.position(), 1);
    }

    #[test]
    fn navigation_does_not_change_answers() {
        let mut s = session(3);
        reveal_current(&mut s);
        s.go_next();
        s.select("C");
        s.go_previous();

        assert_eq!(s.answer("q1"), Some("A"));
        assert_eq!(s.answer("q2"), Some("C"));
        assert!(s.is_revealed("q1"));
        assert!(!s.is_revealed("q2"));
    }

    #[test]
    fn jump_clamps_to_last_position() {
        let mut s = session(4);

        assert!(s.jump_to(99));
        assert_eq!(s.position(), 3);
        assert!(s.jump_to(1));
        assert_eq!(s.position(), 1);
        assert!(!s.jump_to(1));
    }

    #[test]
    fn jump_on_empty_bank_is_rejected() {
        let mut s = session(0);
        assert!(!s.jump_to(0));
        assert!(!s.go_next());
        assert!(!s.go_previous());
    }

    #[test]
    fn review_after_finishing_is_unrestricted_and_keeps_finished() {
        let mut s = session(3);
        s.end();

        s.jump_to(0);
        assert!(s.go_next(), "unrevealed questions can be browsed in review");
        assert!(s.go_next());
        assert!(s.is_finished());
    }

    #[test]
    fn jumping_onto_revealed_last_question_finishes() {
        let mut s = session(3);
        s.jump_to(2);
        reveal_current(&mut s);
        assert!(s.is_finished());
    }
}
