use crossterm::event::{KeyCode, KeyEvent};
use guessr_engine::{Player, SessionId};
use guessr_roster::CandidatePicker;
use log::warn;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, List, ListItem, ListState},
};

use crate::ui::widgets::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    League,
    Team,
    Player,
}

/// What the app should do after a key press in the picker.
#[derive(Debug)]
pub enum PickerAction {
    None,
    Cancel,
    /// Submit `Player` as a guess for the session the picker was opened for.
    Pick(SessionId, Box<Player>),
}

/// League, team and player columns for choosing the next guess.
///
/// Selection survives closing and reopening the picker, so consecutive guesses
/// from the same club don't need to be navigated to again.
#[derive(Debug)]
pub struct PickerScreen {
    picker: CandidatePicker,
    session_id: Option<SessionId>,
    column: Column,
    league_cursor: usize,
    // 0 is "all teams"
    team_cursor: usize,
    player_cursor: usize,
}

impl PickerScreen {
    pub const HELP: &'static str =
        "Tab/←→: Column | ↑↓: Move | Enter: Select | PgUp/PgDn: Page | Type: Filter | Esc: Close";

    pub fn new(picker: CandidatePicker) -> Self {
        Self {
            picker,
            session_id: None,
            column: Column::League,
            league_cursor: 0,
            team_cursor: 0,
            player_cursor: 0,
        }
    }

    /// Opens the picker for guesses against `session_id`.
    pub fn open(&mut self, session_id: SessionId) {
        self.session_id = Some(session_id);
        self.column = if self.picker.selected_league().is_some() {
            Column::Player
        } else {
            Column::League
        };
    }

    pub fn handle_key(&mut self, key_event: KeyEvent) -> PickerAction {
        match key_event.code {
            KeyCode::Esc => return PickerAction::Cancel,
            KeyCode::Tab | KeyCode::Right => self.next_column(),
            KeyCode::BackTab | KeyCode::Left => self.prev_column(),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageDown if self.picker.next_page() => self.player_cursor = 0,
            KeyCode::PageUp if self.picker.prev_page() => self.player_cursor = 0,
            KeyCode::Enter => return self.select(),
            KeyCode::Backspace if self.column == Column::Player => {
                let mut filter = self.picker.name_filter().to_owned();
                filter.pop();
                self.set_filter(filter);
            }
            KeyCode::Char(c) if self.column == Column::Player => {
                let mut filter = self.picker.name_filter().to_owned();
                filter.push(c);
                self.set_filter(filter);
            }
            _ => {}
        }
        PickerAction::None
    }

    fn set_filter(&mut self, filter: String) {
        self.picker.set_name_filter(filter);
        self.player_cursor = 0;
    }

    fn next_column(&mut self) {
        if self.picker.selected_league().is_none() {
            return;
        }
        self.column = match self.column {
            Column::League => Column::Team,
            Column::Team | Column::Player => Column::Player,
        };
    }

    fn prev_column(&mut self) {
        self.column = match self.column {
            Column::League | Column::Team => Column::League,
            Column::Player => Column::Team,
        };
    }

    fn column_len(&self) -> usize {
        match self.column {
            Column::League => self.picker.leagues().len(),
            Column::Team => self.picker.teams().len() + 1,
            Column::Player => self.picker.candidates().items.len(),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.column_len();
        let cursor = match self.column {
            Column::League => &mut self.league_cursor,
            Column::Team => &mut self.team_cursor,
            Column::Player => &mut self.player_cursor,
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn select(&mut self) -> PickerAction {
        match self.column {
            Column::League => {
                let Some(league) = self.picker.leagues().get(self.league_cursor) else {
                    return PickerAction::None;
                };
                let league = league.id.clone();
                if let Err(e) = self.picker.select_league(&league) {
                    warn!("cannot select league {league}: {e}");
                    return PickerAction::None;
                }
                self.team_cursor = 0;
                self.player_cursor = 0;
                self.column = Column::Team;
            }
            Column::Team => {
                let team = self
                    .team_cursor
                    .checked_sub(1)
                    .and_then(|i| self.picker.teams().get(i).map(|team| team.id.clone()));
                match team {
                    Some(team) => {
                        if let Err(e) = self.picker.select_team(&team) {
                            warn!("cannot select team {team}: {e}");
                            return PickerAction::None;
                        }
                    }
                    None => self.picker.clear_team(),
                }
                self.player_cursor = 0;
                self.column = Column::Player;
            }
            Column::Player => {
                let Some(session_id) = self.session_id else {
                    return PickerAction::Cancel;
                };
                let page = self.picker.candidates();
                if let Some(player) = page.items.into_iter().nth(self.player_cursor) {
                    return PickerAction::Pick(session_id, Box::new(player));
                }
            }
        }
        PickerAction::None
    }

    fn column_block(&self, column: Column, title: String) -> Block<'static> {
        let border_style = if self.column == column {
            style::HIGHLIGHT
        } else {
            Style::default()
        };
        Block::bordered().title(title).border_style(border_style)
    }

    fn render_list(
        frame: &mut Frame,
        area: Rect,
        items: Vec<ListItem<'_>>,
        block: Block<'_>,
        cursor: Option<usize>,
    ) {
        let list = List::new(items)
            .block(block)
            .style(style::DEFAULT)
            .highlight_style(style::HIGHLIGHT)
            .highlight_symbol(">> ");
        let mut state = ListState::default();
        state.select(cursor);
        frame.render_stateful_widget(list, area, &mut state);
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let [league_area, team_area, player_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(2),
        ])
        .areas(area);

        let selected_league = self.picker.selected_league();
        let leagues = self
            .picker
            .leagues()
            .iter()
            .map(|league| {
                let item = ListItem::new(league.name.as_str());
                if Some(&league.id) == selected_league {
                    item.style(style::MATCH)
                } else {
                    item
                }
            })
            .collect();
        Self::render_list(
            frame,
            league_area,
            leagues,
            self.column_block(Column::League, "League".to_owned()),
            Some(self.league_cursor),
        );

        let selected_team = self.picker.selected_team();
        let teams = if selected_league.is_some() {
            let all_teams = ListItem::new("All teams");
            let all_teams = if selected_team.is_none() {
                all_teams.style(style::MATCH)
            } else {
                all_teams
            };
            let teams = self.picker.teams().into_iter().map(|team| {
                let item = ListItem::new(team.name.as_str());
                if Some(&team.id) == selected_team {
                    item.style(style::MATCH)
                } else {
                    item
                }
            });
            std::iter::once(all_teams).chain(teams).collect()
        } else {
            vec![]
        };
        Self::render_list(
            frame,
            team_area,
            teams,
            self.column_block(Column::Team, "Club".to_owned()),
            selected_league.map(|_| self.team_cursor),
        );

        let page = self.picker.candidates();
        let players = page
            .items
            .iter()
            .map(|player| {
                ListItem::new(Line::from(format!(
                    "{:<24} {} {:>3}  #{}",
                    player.name, player.position, player.age, player.shirt_number
                )))
            })
            .collect::<Vec<_>>();
        let title = format!(
            "Player  filter: \"{}\"  page {}/{} ({} players)",
            self.picker.name_filter(),
            page.page,
            page.total_pages.max(1),
            page.total_items
        );
        let player_cursor = (!players.is_empty()).then_some(self.player_cursor);
        Self::render_list(
            frame,
            player_area,
            players,
            self.column_block(Column::Player, title),
            player_cursor,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use guessr_roster::{DEFAULT_PER_PAGE, Roster};

    use super::*;

    fn screen() -> PickerScreen {
        paged_screen(DEFAULT_PER_PAGE)
    }

    fn paged_screen(per_page: usize) -> PickerScreen {
        let roster: Roster = serde_json::from_value(serde_json::json!({
            "nations": [{ "id": "EN", "name": "England" }],
            "leagues": [
                { "id": "PL", "name": "Premier League" },
                { "id": "LL", "name": "La Liga" },
            ],
            "teams": [
                { "id": "ars", "name": "Arsenal", "leagueId": "PL" },
                { "id": "che", "name": "Chelsea", "leagueId": "PL" },
            ],
            "players": [
                { "id": "saka", "name": "Bukayo Saka", "nationId": "EN", "teamId": "ars",
                  "position": "FW", "dateOfBirth": "2001-09-05", "shirtNumber": 7 },
                { "id": "rice", "name": "Declan Rice", "nationId": "EN", "teamId": "ars",
                  "position": "MF", "dateOfBirth": "1999-01-14", "shirtNumber": 41 },
                { "id": "palmer", "name": "Cole Palmer", "nationId": "EN", "teamId": "che",
                  "position": "MF", "dateOfBirth": "2002-05-06", "shirtNumber": 10 },
            ],
        }))
        .unwrap();
        let as_of = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        PickerScreen::new(CandidatePicker::new(Arc::new(roster), as_of).per_page(per_page))
    }

    fn press(screen: &mut PickerScreen, code: KeyCode) -> PickerAction {
        screen.handle_key(KeyEvent::from(code))
    }

    fn picked_id(action: PickerAction) -> Option<(SessionId, String)> {
        match action {
            PickerAction::Pick(session_id, player) => Some((session_id, player.id.to_string())),
            PickerAction::None | PickerAction::Cancel => None,
        }
    }

    #[test]
    fn test_league_team_player() {
        let mut screen = screen();
        screen.open(SessionId::new(3));

        // Premier League, then Arsenal, then the second player by name
        assert!(matches!(press(&mut screen, KeyCode::Enter), PickerAction::None));
        assert!(matches!(press(&mut screen, KeyCode::Down), PickerAction::None));
        assert!(matches!(press(&mut screen, KeyCode::Enter), PickerAction::None));
        press(&mut screen, KeyCode::Down);
        let picked = picked_id(press(&mut screen, KeyCode::Enter));
        assert_eq!(picked, Some((SessionId::new(3), "rice".to_owned())));
    }

    #[test]
    fn test_all_teams_and_filter() {
        let mut screen = screen();
        screen.open(SessionId::new(1));
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Enter);
        for c in "PAL".chars() {
            press(&mut screen, KeyCode::Char(c));
        }
        assert_eq!(screen.picker.name_filter(), "PAL");
        let picked = picked_id(press(&mut screen, KeyCode::Enter));
        assert_eq!(picked, Some((SessionId::new(1), "palmer".to_owned())));
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.league_cursor, 0);
        for _ in 0..5 {
            press(&mut screen, KeyCode::Down);
        }
        assert_eq!(screen.league_cursor, 1);
    }

    #[test]
    fn test_cannot_leave_league_column_before_selecting() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.column, Column::League);
        // typing is ignored outside the player column
        press(&mut screen, KeyCode::Char('x'));
        assert_eq!(screen.picker.name_filter(), "");
    }

    #[test]
    fn test_escape_cancels_and_keeps_selection() {
        let mut screen = screen();
        screen.open(SessionId::new(1));
        press(&mut screen, KeyCode::Enter);
        assert!(matches!(press(&mut screen, KeyCode::Esc), PickerAction::Cancel));

        screen.open(SessionId::new(2));
        assert_eq!(screen.column, Column::Player);
        assert!(screen.picker.selected_league().is_some());
    }

    #[test]
    fn test_empty_page_picks_nothing() {
        let mut screen = screen();
        screen.open(SessionId::new(1));
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Enter);
        assert!(matches!(press(&mut screen, KeyCode::Enter), PickerAction::None));
    }

    #[test]
    fn test_paging_resets_cursor() {
        let mut screen = paged_screen(2);
        screen.open(SessionId::new(1));
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.player_cursor, 1);

        press(&mut screen, KeyCode::PageDown);
        assert_eq!(screen.player_cursor, 0);
        assert_eq!(screen.picker.page(), 2);

        // already on the last page
        press(&mut screen, KeyCode::PageDown);
        assert_eq!(screen.picker.page(), 2);

        let picked = picked_id(press(&mut screen, KeyCode::Enter));
        assert_eq!(picked, Some((SessionId::new(1), "rice".to_owned())));

        press(&mut screen, KeyCode::PageUp);
        assert_eq!(screen.picker.page(), 1);
    }
}
