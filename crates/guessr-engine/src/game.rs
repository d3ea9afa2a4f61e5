use log::{info, warn};

use crate::{GameError, GameSession, GameStatus, GuessResult, Player, Scoreboard, SessionId};

/// Owner of the current [`GameSession`].
///
/// There is at most one session at a time. Every call that changes a session
/// names the [`SessionId`] it was made for; input made for a session that has
/// since been replaced or reset is rejected rather than applied to the new one.
///
/// # Example
///
/// ```
/// use guessr_engine::{Game, GameError, League, Nation, Player, Position, Team};
///
/// # fn player(id: &str) -> Player {
/// #     Player {
/// #         id: id.into(),
/// #         name: id.to_owned(),
/// #         nation: Nation { id: "BR".into(), name: "Brazil".to_owned() },
/// #         league: League { id: "L1".into(), name: "League One".to_owned() },
/// #         team: Team { id: "T1".into(), name: "Team One".to_owned() },
/// #         position: Position::Forward,
/// #         age: 25,
/// #         shirt_number: 9,
/// #     }
/// # }
/// let mut game = Game::new();
/// let first = game.start(player("p1"));
/// let second = game.start(player("p2"));
///
/// // A guess picked while the first question was showing is discarded.
/// assert_eq!(
///     game.submit_guess(first, &player("p3")).unwrap_err(),
///     GameError::StaleSession,
/// );
/// assert!(game.history().is_empty());
///
/// game.submit_guess(second, &player("p3")).unwrap();
/// assert_eq!(game.history().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Game {
    next_id: u64,
    session: Option<GameSession>,
    scoreboard: Scoreboard,
}

impl Game {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new session, discarding the current one.
    pub fn start(&mut self, target: Player) -> SessionId {
        self.next_id += 1;
        let id = SessionId::new(self.next_id);
        if let Some(old) = self.session.replace(GameSession::new(id, target)) {
            info!("session {} discarded", old.id());
        }
        id
    }

    /// Discards the current session, if any.
    pub fn reset(&mut self) {
        if let Some(old) = self.session.take() {
            info!("session {} discarded", old.id());
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Status of the current session, or `None` before any session starts.
    #[must_use]
    pub fn status(&self) -> Option<GameStatus> {
        self.session.as_ref().map(GameSession::status)
    }

    /// Guess history of the current session, most recent first.
    #[must_use]
    pub fn history(&self) -> &[GuessResult] {
        match &self.session {
            Some(session) => session.history(),
            None => &[],
        }
    }

    #[must_use]
    pub fn remaining_turns(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, GameSession::remaining_turns)
    }

    /// The revealed target, once the current session is over.
    #[must_use]
    pub fn target(&self) -> Option<&Player> {
        self.session.as_ref().and_then(GameSession::target)
    }

    pub fn submit_guess(
        &mut self,
        session_id: SessionId,
        candidate: &Player,
    ) -> Result<&GuessResult, GameError> {
        let Self {
            session,
            scoreboard,
            ..
        } = self;
        let session = current_session(session.as_mut(), session_id)?;
        session.try_submit_guess(candidate)?;
        record_if_finished(scoreboard, session);
        Ok(&session.history()[0])
    }

    pub fn surrender(&mut self, session_id: SessionId) -> Result<&GuessResult, GameError> {
        let Self {
            session,
            scoreboard,
            ..
        } = self;
        let session = current_session(session.as_mut(), session_id)?;
        session.try_surrender()?;
        record_if_finished(scoreboard, session);
        Ok(&session.history()[0])
    }
}

fn current_session(
    session: Option<&mut GameSession>,
    session_id: SessionId,
) -> Result<&mut GameSession, GameError> {
    let Some(session) = session else {
        warn!("rejected input for session {session_id}: no session started");
        return Err(GameError::NotStarted);
    };
    if session.id() != session_id {
        warn!(
            "rejected input for session {session_id}: current session is {}",
            session.id()
        );
        return Err(GameError::StaleSession);
    }
    Ok(session)
}

fn record_if_finished(scoreboard: &mut Scoreboard, session: &GameSession) {
    if session.status().is_terminal() {
        scoreboard.record(session.status(), session.turns_used());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        TURN_LIMIT,
        player::fixtures::{target, wrong_guess},
    };

    #[test]
    fn test_no_guesses_before_start() {
        let mut game = Game::new();
        assert_eq!(game.status(), None);
        assert_eq!(game.remaining_turns(), 0);
        assert_eq!(
            game.submit_guess(SessionId::new(1), &target()).unwrap_err(),
            GameError::NotStarted
        );
        assert_eq!(
            game.surrender(SessionId::new(1)).unwrap_err(),
            GameError::NotStarted
        );
    }

    #[test]
    fn test_reset_discards_session() {
        let mut game = Game::new();
        let id = game.start(target());
        game.submit_guess(id, &wrong_guess(1)).unwrap();
        game.reset();

        assert!(game.session().is_none());
        assert!(game.history().is_empty());
        assert_eq!(
            game.submit_guess(id, &wrong_guess(2)).unwrap_err(),
            GameError::NotStarted
        );
    }

    #[test]
    fn test_restart_never_mixes_histories() {
        let mut game = Game::new();
        let first = game.start(target());
        game.submit_guess(first, &wrong_guess(1)).unwrap();

        let second = game.start(wrong_guess(5));
        assert_ne!(first, second);
        assert!(game.history().is_empty());
        assert_eq!(game.status(), Some(GameStatus::InProgress));

        assert_eq!(
            game.submit_guess(first, &wrong_guess(2)).unwrap_err(),
            GameError::StaleSession
        );
        assert_eq!(game.surrender(first).unwrap_err(), GameError::StaleSession);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_target_hidden_until_terminal() {
        let mut game = Game::new();
        let id = game.start(target());
        game.submit_guess(id, &wrong_guess(1)).unwrap();
        assert!(game.target().is_none());

        game.surrender(id).unwrap();
        assert_eq!(game.target(), Some(&target()));
        assert_eq!(
            game.surrender(id).unwrap_err(),
            GameError::SessionEnded(crate::SessionEndedError(GameStatus::Surrendered))
        );
    }

    #[test]
    fn test_scoreboard_records_each_session_once() {
        let mut game = Game::new();

        let id = game.start(target());
        game.submit_guess(id, &wrong_guess(1)).unwrap();
        game.submit_guess(id, &target()).unwrap();
        _ = game.submit_guess(id, &target());

        let id = game.start(target());
        for n in 1..=TURN_LIMIT {
            game.submit_guess(id, &wrong_guess(n)).unwrap();
        }
        assert!(game.submit_guess(id, &wrong_guess(9)).is_err());
        assert_eq!(game.history().len(), TURN_LIMIT);

        let id = game.start(target());
        game.surrender(id).unwrap();

        // discarded mid-game: not counted
        let id = game.start(target());
        game.submit_guess(id, &wrong_guess(1)).unwrap();
        game.reset();

        let scoreboard = game.scoreboard();
        assert_eq!(scoreboard.played(), 3);
        assert_eq!(scoreboard.won(), 1);
        assert_eq!(scoreboard.lost(), 1);
        assert_eq!(scoreboard.surrendered(), 1);
        assert_eq!(scoreboard.guess_distribution()[2], 1);
    }
}
