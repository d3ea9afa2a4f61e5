use std::{fmt, str::FromStr, sync::Arc};

use chrono::NaiveDate;
use guessr_engine::Player;
use log::{debug, info};
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{FetchError, Roster};

/// Identifier of an admin-authored question.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

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
    derive_more::FromStr,
)]
#[serde(rename_all = "camelCase")]
pub enum QuestionLevel {
    Easy,
    Medium,
    Hard,
}

/// A question: the target player and how hard it is meant to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub level: QuestionLevel,
    pub player: Player,
}

/// Source of random questions.
///
/// Failing to fetch means no session can be started; it is not a game result.
pub trait QuestionProvider {
    fn fetch_random(&mut self) -> Result<Question, FetchError>;
}

/// Seed for deterministic question selection.
///
/// 128 bits, written as a 32-character hex string both in JSON and on the
/// command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSeed([u8; 16]);

impl QuestionSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed `{input}`: expected 32 hex characters")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for QuestionSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl fmt::Display for QuestionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for QuestionSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuestionSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<QuestionSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> QuestionSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        QuestionSeed(seed)
    }
}

/// Picks questions uniformly at random from a roster.
///
/// The same question is not drawn twice in a row unless it is the only one
/// available.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use chrono::NaiveDate;
/// use guessr_roster::{FetchError, QuestionProvider as _, Roster, RosterQuestionProvider};
///
/// let as_of = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let mut provider = RosterQuestionProvider::new(Arc::new(Roster::default()), as_of);
/// assert!(matches!(provider.fetch_random(), Err(FetchError::NoQuestions { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct RosterQuestionProvider {
    roster: Arc<Roster>,
    as_of: NaiveDate,
    level: Option<QuestionLevel>,
    rng: Pcg32,
    last: Option<QuestionId>,
}

impl RosterQuestionProvider {
    /// Creates a provider with a random seed.
    #[must_use]
    pub fn new(roster: Arc<Roster>, as_of: NaiveDate) -> Self {
        Self::with_seed(roster, as_of, rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(roster: Arc<Roster>, as_of: NaiveDate, seed: QuestionSeed) -> Self {
        debug!("question seed {seed}");
        Self {
            roster,
            as_of,
            level: None,
            rng: Pcg32::from_seed(seed.0),
            last: None,
        }
    }

    /// Only draw questions of the given level.
    #[must_use]
    pub fn level(self, level: Option<QuestionLevel>) -> Self {
        Self { level, ..self }
    }

    #[must_use]
    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }
}

impl QuestionProvider for RosterQuestionProvider {
    fn fetch_random(&mut self) -> Result<Question, FetchError> {
        let matching: Vec<_> = self
            .roster
            .questions
            .iter()
            .filter(|q| self.level.is_none_or(|level| q.level == level))
            .collect();
        let fresh: Vec<_> = matching
            .iter()
            .copied()
            .filter(|q| self.last.as_ref() != Some(&q.id))
            .collect();
        let pool = if fresh.is_empty() { &matching } else { &fresh };

        let record = *pool
            .choose(&mut self.rng)
            .ok_or(FetchError::NoQuestions { level: self.level })?;
        let player = self.roster.resolve_player(&record.player_id, self.as_of)?;

        info!("drew question {} ({})", record.id, record.level);
        self.last = Some(record.id.clone());
        Ok(Question {
            id: record.id.clone(),
            level: record.level,
            player,
        })
    }
}
