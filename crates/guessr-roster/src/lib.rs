//! Reference data for the guessing game and the collaborators built on it.
//!
//! - [`Roster`] - Nations, leagues, teams, players and questions, loaded from JSON
//! - [`QuestionProvider`] / [`RosterQuestionProvider`] - Random target selection
//! - [`CandidatePicker`] - League, team and name filtering with pagination
//!
//! The roster stores dates of birth; ages are computed for a reference date
//! when a record is turned into a [`guessr_engine::Player`].

use chrono::NaiveDate;
use guessr_engine::PlayerId;

pub use self::{picker::*, question::*, roster::*};

mod picker;
mod question;
mod roster;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RosterError {
    #[display("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
    #[display("{kind} `{id}` refers to unknown {target_kind} `{target_id}`")]
    DanglingReference {
        kind: &'static str,
        id: String,
        target_kind: &'static str,
        target_id: String,
    },
    #[display("unknown {kind} `{id}`")]
    NotFound { kind: &'static str, id: String },
    #[display("player `{player}` has shirt number {shirt_number}, expected 1-99")]
    ShirtNumberOutOfRange { player: PlayerId, shirt_number: u8 },
    #[display("player `{player}` was born on {date_of_birth}, after {as_of}")]
    BornAfterReferenceDate {
        player: PlayerId,
        date_of_birth: NaiveDate,
        as_of: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FetchError {
    #[display("no questions available{}", level.map(|l| format!(" for level {l}")).unwrap_or_default())]
    NoQuestions { level: Option<QuestionLevel> },
    #[display("failed to resolve question player: {_0}")]
    Roster(RosterError),
}

impl From<RosterError> for FetchError {
    fn from(err: RosterError) -> Self {
        Self::Roster(err)
    }
}
