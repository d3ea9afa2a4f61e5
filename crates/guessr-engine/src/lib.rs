//! Guess evaluation engine for the "guess the footballer" game.
//!
//! - [`Player`] - The attributes of a target or candidate player
//! - [`Attribute`] / [`Outcome`] - Per-attribute comparison rules
//! - [`evaluate`] / [`GuessResult`] - Feedback for one guess
//! - [`GameSession`] - One round: a hidden target and up to [`TURN_LIMIT`] guesses
//! - [`Game`] - Owner of the current session, rejecting input for replaced sessions
//! - [`Scoreboard`] - Results across finished sessions
//!
//! # Game Flow
//!
//! 1. Fetch a target player and [`Game::start`] a session with it
//! 2. Submit candidate players with [`Game::submit_guess`]
//! 3. Each guess is compared attribute by attribute; the history grows
//! 4. The session ends on a correct guess, after [`TURN_LIMIT`] wrong guesses,
//!    or on [`Game::surrender`], and the target is revealed
//!
//! Everything here is synchronous and does no I/O.

pub use self::{comparator::*, evaluator::*, game::*, player::*, scoreboard::*, session::*};

mod comparator;
mod evaluator;
mod game;
mod player;
mod scoreboard;
mod session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("session already {_0}")]
pub struct SessionEndedError(#[error(not(source))] pub(crate) GameStatus);

impl SessionEndedError {
    /// The terminal status the session was in when the input arrived.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.0
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum GameError {
    #[display("no session started")]
    NotStarted,
    #[display("input was made for a replaced session")]
    StaleSession,
    #[display("{_0}")]
    #[from]
    SessionEnded(SessionEndedError),
}
