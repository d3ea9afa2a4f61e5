use std::sync::Arc;

use chrono::NaiveDate;
use guessr_engine::{LeagueId, Player, TeamId};
use log::warn;
use serde::Serialize;

use crate::{LeagueRecord, PlayerRecord, Roster, RosterError, TeamRecord};

pub const DEFAULT_PER_PAGE: usize = 10;

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Narrows the roster down to a candidate to submit as a guess.
///
/// Selection goes league, then (optionally) team, then player. All selection
/// state lives here and is passed around explicitly.
///
/// - Selecting a league clears the team and goes back to page 1
/// - Selecting a team goes back to page 1
/// - Changing the name filter goes back to page 1
#[derive(Debug, Clone)]
pub struct CandidatePicker {
    roster: Arc<Roster>,
    as_of: NaiveDate,
    league: Option<LeagueId>,
    team: Option<TeamId>,
    name_filter: String,
    page: usize,
    per_page: usize,
}

impl CandidatePicker {
    #[must_use]
    pub fn new(roster: Arc<Roster>, as_of: NaiveDate) -> Self {
        Self {
            roster,
            as_of,
            league: None,
            team: None,
            name_filter: String::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Sets the page size. Zero is treated as one.
    #[must_use]
    pub fn per_page(self, per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            ..self
        }
    }

    #[must_use]
    pub fn leagues(&self) -> &[LeagueRecord] {
        &self.roster.leagues
    }

    /// Teams of the selected league; empty while no league is selected.
    #[must_use]
    pub fn teams(&self) -> Vec<&TeamRecord> {
        match &self.league {
            Some(league) => self.roster.teams_in_league(league).collect(),
            None => vec![],
        }
    }

    #[must_use]
    pub fn selected_league(&self) -> Option<&LeagueId> {
        self.league.as_ref()
    }

    #[must_use]
    pub fn selected_team(&self) -> Option<&TeamId> {
        self.team.as_ref()
    }

    #[must_use]
    pub fn name_filter(&self) -> &str {
        &self.name_filter
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn select_league(&mut self, league: &LeagueId) -> Result<(), RosterError> {
        if self.roster.league(league).is_none() {
            return Err(RosterError::NotFound {
                kind: "league",
                id: league.to_string(),
            });
        }
        self.league = Some(league.clone());
        self.team = None;
        self.page = 1;
        Ok(())
    }

    /// Selects a team, switching to its league if needed.
    pub fn select_team(&mut self, team: &TeamId) -> Result<(), RosterError> {
        let Some(record) = self.roster.team(team) else {
            return Err(RosterError::NotFound {
                kind: "team",
                id: team.to_string(),
            });
        };
        self.league = Some(record.league_id.clone());
        self.team = Some(team.clone());
        self.page = 1;
        Ok(())
    }

    /// Widens the selection back to the whole league.
    pub fn clear_team(&mut self) {
        self.team = None;
        self.page = 1;
    }

    pub fn set_name_filter(&mut self, filter: impl Into<String>) {
        self.name_filter = filter.into();
        self.page = 1;
    }

    /// Moves to the next page. Returns `false` if already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page >= self.total_pages() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Moves to the previous page. Returns `false` if already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Candidates on the current page, sorted by name.
    ///
    /// Empty while no league is selected.
    #[must_use]
    pub fn candidates(&self) -> Page<Player> {
        let matching = self.matching_players();
        let total_items = matching.len();
        let total_pages = total_items.div_ceil(self.per_page);
        let items = matching
            .into_iter()
            .skip((self.page - 1) * self.per_page)
            .take(self.per_page)
            .filter_map(|record| match self.roster.resolve_record(record, self.as_of) {
                Ok(player) => Some(player),
                Err(e) => {
                    warn!("skipping candidate {}: {e}", record.id);
                    None
                }
            })
            .collect();
        Page {
            items,
            page: self.page,
            per_page: self.per_page,
            total_items,
            total_pages,
        }
    }

    fn total_pages(&self) -> usize {
        self.matching_players().len().div_ceil(self.per_page)
    }

    fn matching_players(&self) -> Vec<&PlayerRecord> {
        let Some(league) = &self.league else {
            return vec![];
        };
        let needle = self.name_filter.trim().to_lowercase();
        let mut players: Vec<_> = self
            .roster
            .players
            .iter()
            .filter(|p| match &self.team {
                Some(team) => &p.team_id == team,
                None => self
                    .roster
                    .team(&p.team_id)
                    .is_some_and(|t| &t.league_id == league),
            })
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        players
    }
}
