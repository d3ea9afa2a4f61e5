use serde::Serialize;

use crate::{GameStatus, TURN_LIMIT};

/// Results of finished sessions, kept across "play again" rounds.
///
/// - **Played**: sessions that reached a terminal status
/// - **Won / lost / surrendered**: count per terminal status
/// - **Streaks**: consecutive wins, reset by any loss or surrender
/// - **Guess distribution**: how many guesses each win took
///
/// # Example
///
/// ```
/// use guessr_engine::{GameStatus, Scoreboard};
///
/// let mut scoreboard = Scoreboard::new();
/// scoreboard.record(GameStatus::Won, 3);
/// scoreboard.record(GameStatus::Lost, 8);
///
/// assert_eq!(scoreboard.played(), 2);
/// assert_eq!(scoreboard.won(), 1);
/// assert_eq!(scoreboard.guess_distribution()[3], 1);
/// assert_eq!(scoreboard.current_streak(), 0);
/// assert_eq!(scoreboard.best_streak(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoreboard {
    won: usize,
    lost: usize,
    surrendered: usize,
    current_streak: usize,
    best_streak: usize,
    guess_distribution: [usize; TURN_LIMIT + 1],
}

impl Scoreboard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            won: 0,
            lost: 0,
            surrendered: 0,
            current_streak: 0,
            best_streak: 0,
            guess_distribution: [0; TURN_LIMIT + 1],
        }
    }

    #[must_use]
    pub const fn played(&self) -> usize {
        self.won + self.lost + self.surrendered
    }

    #[must_use]
    pub const fn won(&self) -> usize {
        self.won
    }

    #[must_use]
    pub const fn lost(&self) -> usize {
        self.lost
    }

    #[must_use]
    pub const fn surrendered(&self) -> usize {
        self.surrendered
    }

    #[must_use]
    pub const fn current_streak(&self) -> usize {
        self.current_streak
    }

    #[must_use]
    pub const fn best_streak(&self) -> usize {
        self.best_streak
    }

    /// Wins by number of guesses taken.
    ///
    /// Index `n` counts wins on the `n`-th guess; index 0 is always zero.
    #[must_use]
    pub const fn guess_distribution(&self) -> &[usize; TURN_LIMIT + 1] {
        &self.guess_distribution
    }

    /// Records a finished session. In-progress statuses are ignored.
    pub fn record(&mut self, status: GameStatus, turns_used: usize) {
        match status {
            GameStatus::InProgress => return,
            GameStatus::Won => {
                self.won += 1;
                self.current_streak += 1;
                self.best_streak = usize::max(self.best_streak, self.current_streak);
                if let Some(count) = self.guess_distribution.get_mut(turns_used) {
                    *count += 1;
                }
            }
            GameStatus::Lost => self.lost += 1,
            GameStatus::Surrendered => self.surrendered += 1,
        }
        if !status.is_won() {
            self.current_streak = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaks() {
        let mut scoreboard = Scoreboard::new();
        scoreboard.record(GameStatus::Won, 1);
        scoreboard.record(GameStatus::Won, 2);
        scoreboard.record(GameStatus::Surrendered, 4);
        scoreboard.record(GameStatus::Won, 8);

        assert_eq!(scoreboard.played(), 4);
        assert_eq!(scoreboard.won(), 3);
        assert_eq!(scoreboard.surrendered(), 1);
        assert_eq!(scoreboard.current_streak(), 1);
        assert_eq!(scoreboard.best_streak(), 2);
        assert_eq!(scoreboard.guess_distribution(), &[0, 1, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_in_progress_is_ignored() {
        let mut scoreboard = Scoreboard::new();
        scoreboard.record(GameStatus::Won, 2);
        scoreboard.record(GameStatus::InProgress, 3);
        assert_eq!(scoreboard.played(), 1);
        assert_eq!(scoreboard.current_streak(), 1);
    }
}
