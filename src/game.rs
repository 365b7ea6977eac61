//! Number-guessing game: difficulties, the guess/feedback session, and records

pub mod difficulty;
pub mod records;
pub mod session;

pub use difficulty::Difficulty;
pub use records::{Records, validate_name};
pub use session::{
    GameSession, GuessOutcome, Hint, MISS_REWARD, OpponentTurn, SUCCESS_REWARD, Winner,
};
