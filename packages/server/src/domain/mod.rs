//! Game domain: questions, player sessions, and per-game state.

mod error;
mod game;
mod question;
mod session;

pub use error::GameError;
pub use game::{AnswerOutcome, Game, GameRegistry, SCORE_AWARD, SessionView};
pub use question::{PublicQuestion, Question, QuestionBank};
pub use session::{PlayerScore, PlayerSession};
