use chrono::{DateTime, TimeDelta, Utc};

/// Time source for a quiz session: the system clock or a fixed instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Move a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: TimeDelta) {
        if let Clock::Fixed(at) = self {
            *at += delta;
        }
    }
}

/// Deterministic start instant for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// A clock fixed at [`FIXED_TEST_TIMESTAMP`].
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(FIXED_TEST_TIMESTAMP))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_starts_at_the_test_timestamp() {
        assert_eq!(fixed_clock().now().timestamp(), FIXED_TEST_TIMESTAMP);
    }

    #[test]
    fn fixed_clock_only_moves_when_advanced() {
        let mut clock = fixed_clock();
        let before = clock.now();

        assert_eq!(clock.now(), before);
        clock.advance(TimeDelta::seconds(90));
        assert_eq!(clock.now() - before, TimeDelta::seconds(90));
    }

    #[test]
    fn advancing_system_clock_is_a_no_op() {
        let mut clock = Clock::System;
        clock.advance(TimeDelta::days(1));
        assert_eq!(clock, Clock::System);
    }
}
