//! The quiz engine: a tick-driven countdown and the three-phase session
//! state machine.

mod countdown;
mod results;
mod session;

pub use countdown::Countdown;
pub use results::{QuizResult, QuizSummary, SummaryTier};
pub use session::{QuizPhase, QuizSession};
