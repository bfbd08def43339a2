//! The quiz session engine shared by every question-bank topic.

mod clock;
mod navigation;
mod order;
mod results;
mod session;

pub use clock::{Clock, FIXED_TEST_TIMESTAMP, fixed_clock};
pub use order::{OrderMode, build_order};
pub use results::{Elapsed, MissedQuestion, QuizResults};
pub use session::{QuestionStatus, QuizSession, SessionStatus};
