use std::collections::HashSet;

use chrono::NaiveDate;
use guessr_engine::{League, LeagueId, Nation, NationId, Player, PlayerId, Position, Team, TeamId};
use serde::{Deserialize, Serialize};

use crate::{QuestionId, QuestionLevel, RosterError};

/// Valid shirt numbers.
pub const SHIRT_NUMBERS: std::ops::RangeInclusive<u8> = 1..=99;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationRecord {
    pub id: NationId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueRecord {
    pub id: LeagueId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
    pub league_id: LeagueId,
}

/// A player as stored in the roster file.
///
/// The league is not stored: it is the league of the player's team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub nation_id: NationId,
    pub team_id: TeamId,
    pub position: Position,
    pub date_of_birth: NaiveDate,
    pub shirt_number: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub player_id: PlayerId,
    pub level: QuestionLevel,
}

/// Reference data for the game: who can be guessed and which players are
/// questions.
///
/// Loaded from a JSON document with one array per collection. Missing
/// collections are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roster {
    pub nations: Vec<NationRecord>,
    pub leagues: Vec<LeagueRecord>,
    pub teams: Vec<TeamRecord>,
    pub players: Vec<PlayerRecord>,
    pub questions: Vec<QuestionRecord>,
}

/// Collection sizes, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterSummary {
    pub nations: usize,
    pub leagues: usize,
    pub teams: usize,
    pub players: usize,
    pub questions: usize,
}

impl Roster {
    #[must_use]
    pub fn summary(&self) -> RosterSummary {
        RosterSummary {
            nations: self.nations.len(),
            leagues: self.leagues.len(),
            teams: self.teams.len(),
            players: self.players.len(),
            questions: self.questions.len(),
        }
    }

    #[must_use]
    pub fn nation(&self, id: &NationId) -> Option<&NationRecord> {
        self.nations.iter().find(|n| &n.id == id)
    }

    #[must_use]
    pub fn league(&self, id: &LeagueId) -> Option<&LeagueRecord> {
        self.leagues.iter().find(|l| &l.id == id)
    }

    #[must_use]
    pub fn team(&self, id: &TeamId) -> Option<&TeamRecord> {
        self.teams.iter().find(|t| &t.id == id)
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn teams_in_league<'a>(
        &'a self,
        league_id: &'a LeagueId,
    ) -> impl Iterator<Item = &'a TeamRecord> + 'a {
        self.teams.iter().filter(move |t| &t.league_id == league_id)
    }

    /// Checks the roster for internal consistency.
    ///
    /// Reports the first problem found, checking collections in file order:
    /// nations, leagues, teams, players, questions.
    pub fn validate(&self, as_of: NaiveDate) -> Result<(), RosterError> {
        check_unique("nation", self.nations.iter().map(|n| n.id.as_str()))?;
        check_unique("league", self.leagues.iter().map(|l| l.id.as_str()))?;
        check_unique("team", self.teams.iter().map(|t| t.id.as_str()))?;
        check_unique("player", self.players.iter().map(|p| p.id.as_str()))?;
        check_unique("question", self.questions.iter().map(|q| q.id.as_str()))?;

        for team in &self.teams {
            if self.league(&team.league_id).is_none() {
                return Err(RosterError::DanglingReference {
                    kind: "team",
                    id: team.id.to_string(),
                    target_kind: "league",
                    target_id: team.league_id.to_string(),
                });
            }
        }

        for player in &self.players {
            if self.nation(&player.nation_id).is_none() {
                return Err(RosterError::DanglingReference {
                    kind: "player",
                    id: player.id.to_string(),
                    target_kind: "nation",
                    target_id: player.nation_id.to_string(),
                });
            }
            if self.team(&player.team_id).is_none() {
                return Err(RosterError::DanglingReference {
                    kind: "player",
                    id: player.id.to_string(),
                    target_kind: "team",
                    target_id: player.team_id.to_string(),
                });
            }
            if !SHIRT_NUMBERS.contains(&player.shirt_number) {
                return Err(RosterError::ShirtNumberOutOfRange {
                    player: player.id.clone(),
                    shirt_number: player.shirt_number,
                });
            }
            if player.date_of_birth > as_of {
                return Err(RosterError::BornAfterReferenceDate {
                    player: player.id.clone(),
                    date_of_birth: player.date_of_birth,
                    as_of,
                });
            }
        }

        for question in &self.questions {
            if self.player(&question.player_id).is_none() {
                return Err(RosterError::DanglingReference {
                    kind: "question",
                    id: question.id.to_string(),
                    target_kind: "player",
                    target_id: question.player_id.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Builds the engine's view of a player, with age computed on `as_of`.
    pub fn resolve_player(&self, id: &PlayerId, as_of: NaiveDate) -> Result<Player, RosterError> {
        let record = self.player(id).ok_or_else(|| RosterError::NotFound {
            kind: "player",
            id: id.to_string(),
        })?;
        self.resolve_record(record, as_of)
    }

    pub(crate) fn resolve_record(
        &self,
        record: &PlayerRecord,
        as_of: NaiveDate,
    ) -> Result<Player, RosterError> {
        let dangling = |target_kind, target_id: &str| RosterError::DanglingReference {
            kind: "player",
            id: record.id.to_string(),
            target_kind,
            target_id: target_id.to_owned(),
        };
        let nation = self
            .nation(&record.nation_id)
            .ok_or_else(|| dangling("nation", record.nation_id.as_str()))?;
        let team = self
            .team(&record.team_id)
            .ok_or_else(|| dangling("team", record.team_id.as_str()))?;
        let league = self
            .league(&team.league_id)
            .ok_or_else(|| dangling("league", team.league_id.as_str()))?;
        let age = age_on(record.date_of_birth, as_of).ok_or(
            RosterError::BornAfterReferenceDate {
                player: record.id.clone(),
                date_of_birth: record.date_of_birth,
                as_of,
            },
        )?;

        Ok(Player {
            id: record.id.clone(),
            name: record.name.clone(),
            nation: Nation {
                id: nation.id.clone(),
                name: nation.name.clone(),
            },
            league: League {
                id: league.id.clone(),
                name: league.name.clone(),
            },
            team: Team {
                id: team.id.clone(),
                name: team.name.clone(),
            },
            position: record.position,
            age,
            shirt_number: record.shirt_number,
        })
    }
}

/// Age in whole years on `as_of`, or `None` if born after it.
///
/// Ages beyond `u8::MAX` saturate.
#[must_use]
pub fn age_on(date_of_birth: NaiveDate, as_of: NaiveDate) -> Option<u8> {
    let years = as_of.years_since(date_of_birth)?;
    Some(u8::try_from(years).unwrap_or(u8::MAX))
}

fn check_unique<'a, I>(kind: &'static str, ids: I) -> Result<(), RosterError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RosterError::DuplicateId {
                kind,
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}
