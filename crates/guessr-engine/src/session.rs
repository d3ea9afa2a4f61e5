use arrayvec::ArrayVec;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{GuessResult, Player, SessionEndedError, evaluate};

/// Maximum number of guesses per session.
pub const TURN_LIMIT: usize = 8;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[display("in progress")]
    InProgress,
    #[display("won")]
    Won,
    #[display("lost")]
    Lost,
    #[display("surrendered")]
    Surrendered,
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Identifies one started session, so that input meant for a replaced session
/// can be told apart from input for the current one.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{_0}")]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One round of the game: a hidden target and up to [`TURN_LIMIT`] guesses.
///
/// # State transitions
///
/// ```text
///              correct guess
/// InProgress ────────────────→ Won
///     │  │     8th wrong guess
///     │  └───────────────────→ Lost
///     │        surrender
///     └──────────────────────→ Surrendered
/// ```
///
/// Terminal sessions reject every further transition and stay unchanged.
///
/// # Example
///
/// ```
/// use guessr_engine::{GameSession, GameStatus, League, Nation, Player, Position, SessionId, Team};
///
/// let target = Player {
///     id: "p1".into(),
///     name: "Someone".to_owned(),
///     nation: Nation { id: "BR".into(), name: "Brazil".to_owned() },
///     league: League { id: "L1".into(), name: "League One".to_owned() },
///     team: Team { id: "T1".into(), name: "Team One".to_owned() },
///     position: Position::Forward,
///     age: 25,
///     shirt_number: 9,
/// };
///
/// let mut session = GameSession::new(SessionId::new(1), target.clone());
/// assert!(session.target().is_none());
///
/// session.try_submit_guess(&target).unwrap();
/// assert_eq!(session.status(), GameStatus::Won);
/// assert_eq!(session.target(), Some(&target));
/// assert!(session.try_surrender().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    target: Player,
    history: ArrayVec<GuessResult, TURN_LIMIT>,
    turns_used: usize,
    status: GameStatus,
}

impl GameSession {
    #[must_use]
    pub fn new(id: SessionId, target: Player) -> Self {
        info!("session {id} started");
        Self {
            id,
            target,
            history: ArrayVec::new(),
            turns_used: 0,
            status: GameStatus::InProgress,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Guess results, most recent first.
    #[must_use]
    pub fn history(&self) -> &[GuessResult] {
        &self.history
    }

    /// Number of submitted guesses. The surrender reveal does not count.
    #[must_use]
    pub fn turns_used(&self) -> usize {
        self.turns_used
    }

    #[must_use]
    pub fn remaining_turns(&self) -> usize {
        TURN_LIMIT - self.turns_used
    }

    /// The target, once the session is over.
    #[must_use]
    pub fn target(&self) -> Option<&Player> {
        self.status.is_terminal().then_some(&self.target)
    }

    pub fn try_submit_guess(
        &mut self,
        candidate: &Player,
    ) -> Result<&GuessResult, SessionEndedError> {
        self.ensure_in_progress("guess")?;

        let result = evaluate(candidate, &self.target);
        let is_correct = result.is_correct_guess();
        self.push_front(result);
        self.turns_used += 1;

        if is_correct {
            self.finish(GameStatus::Won);
        } else if self.history.len() == TURN_LIMIT {
            self.finish(GameStatus::Lost);
        }
        Ok(&self.history[0])
    }

    /// Gives up, revealing the target as the newest history entry.
    pub fn try_surrender(&mut self) -> Result<&GuessResult, SessionEndedError> {
        self.ensure_in_progress("surrender")?;

        let reveal = evaluate(&self.target, &self.target).into_revealed();
        self.push_front(reveal);
        self.finish(GameStatus::Surrendered);
        Ok(&self.history[0])
    }

    fn ensure_in_progress(&self, action: &str) -> Result<(), SessionEndedError> {
        if self.status.is_terminal() {
            warn!(
                "session {} rejected {action}: already {}",
                self.id, self.status
            );
            return Err(SessionEndedError(self.status));
        }
        Ok(())
    }

    fn push_front(&mut self, result: GuessResult) {
        // An in-progress session always has room: the last free slot ends it.
        self.history.insert(0, result);
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        info!(
            "session {} {status} after {} guess(es)",
            self.id, self.turns_used
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Position,
        player::fixtures::{player, target, wrong_guess},
    };

    fn new_session() -> GameSession {
        GameSession::new(SessionId::new(1), target())
    }

    #[test]
    fn test_new_session() {
        let session = new_session();
        assert_eq!(session.status(), GameStatus::InProgress);
        assert!(session.history().is_empty());
        assert_eq!(session.remaining_turns(), TURN_LIMIT);
        assert!(session.target().is_none());
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let mut session = new_session();
        session.try_submit_guess(&wrong_guess(1)).unwrap();
        session.try_submit_guess(&wrong_guess(2)).unwrap();
        session.try_submit_guess(&wrong_guess(3)).unwrap();

        let ids: Vec<_> = session
            .history()
            .iter()
            .map(|r| r.player().id.as_str())
            .collect();
        assert_eq!(ids, ["w3", "w2", "w1"]);
        assert_eq!(session.remaining_turns(), TURN_LIMIT - 3);
        assert!(session.status().is_in_progress());
    }

    #[test]
    fn test_correct_guess_wins_immediately() {
        let mut session = new_session();
        session.try_submit_guess(&wrong_guess(1)).unwrap();
        let result = session.try_submit_guess(&target()).unwrap();
        assert!(result.is_correct_guess());

        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.remaining_turns(), TURN_LIMIT - 2);
        assert_eq!(session.target().map(|p| p.id.as_str()), Some("p1"));
    }

    #[test]
    fn test_win_on_last_turn_is_not_a_loss() {
        let mut session = new_session();
        for n in 1..TURN_LIMIT {
            session.try_submit_guess(&wrong_guess(n)).unwrap();
        }
        session.try_submit_guess(&target()).unwrap();
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.history().len(), TURN_LIMIT);
    }

    #[test]
    fn test_eight_wrong_guesses_lose() {
        let mut session = new_session();
        for n in 1..=TURN_LIMIT {
            assert!(session.status().is_in_progress());
            session.try_submit_guess(&wrong_guess(n)).unwrap();
        }
        assert_eq!(session.status(), GameStatus::Lost);
        assert_eq!(session.remaining_turns(), 0);

        let err = session.try_submit_guess(&wrong_guess(9)).unwrap_err();
        assert_eq!(err.status(), GameStatus::Lost);
        assert_eq!(session.history().len(), TURN_LIMIT);
    }

    #[test]
    fn test_same_attributes_different_id_is_not_a_win() {
        let mut session = new_session();
        let twin = player("p1-twin", "BR", "L1", "T1", Position::Forward, 25, 9);
        let result = session.try_submit_guess(&twin).unwrap();
        assert!(result.outcomes().all_match());
        assert!(session.status().is_in_progress());
    }

    #[test]
    fn test_surrender_reveals_target() {
        let mut session = new_session();
        session.try_submit_guess(&wrong_guess(1)).unwrap();
        session.try_surrender().unwrap();

        assert_eq!(session.status(), GameStatus::Surrendered);
        assert_eq!(session.history().len(), 2);
        let reveal = &session.history()[0];
        assert!(reveal.kind().is_revealed());
        assert!(reveal.is_correct_guess());
        assert!(reveal.outcomes().all_match());
        assert_eq!(reveal.player(), session.target().unwrap());
        assert_eq!(session.turns_used(), 1);
    }

    #[test]
    fn test_no_transitions_after_surrender() {
        let mut session = new_session();
        session.try_surrender().unwrap();

        assert!(session.try_surrender().is_err());
        assert!(session.try_submit_guess(&target()).is_err());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.status(), GameStatus::Surrendered);
    }

    #[test]
    fn test_surrender_on_last_free_turn() {
        let mut session = new_session();
        for n in 1..TURN_LIMIT {
            session.try_submit_guess(&wrong_guess(n)).unwrap();
        }
        session.try_surrender().unwrap();
        assert_eq!(session.history().len(), TURN_LIMIT);
        assert_eq!(session.status(), GameStatus::Surrendered);
    }

    #[test]
    fn test_history_never_exceeds_turn_limit() {
        let mut session = new_session();
        for n in 0..20 {
            _ = session.try_submit_guess(&wrong_guess(n));
            _ = session.try_surrender();
            assert!(session.history().len() <= TURN_LIMIT);
        }
    }
}
