use guessr_engine::{Game, GameStatus, TURN_LIMIT};
use guessr_roster::QuestionLevel;
use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget},
};

use crate::ui::widgets::style;

/// Current session status and the running scoreboard.
#[derive(Debug)]
pub struct StatusDisplay<'a> {
    game: &'a Game,
    level: Option<QuestionLevel>,
    block: Option<Block<'a>>,
}

impl<'a> StatusDisplay<'a> {
    pub fn new(game: &'a Game) -> Self {
        Self {
            game,
            level: None,
            block: None,
        }
    }

    pub fn level(self, level: Option<QuestionLevel>) -> Self {
        Self { level, ..self }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        let margin = if self.block.is_some() { 2 } else { 0 };
        5 + margin
    }

    fn status_span(status: Option<GameStatus>) -> Span<'static> {
        match status {
            None => Span::styled("no question", style::HELP),
            Some(GameStatus::InProgress) => Span::styled("in progress", style::DEFAULT),
            Some(GameStatus::Won) => Span::styled(" WON ", style::WON),
            Some(GameStatus::Lost) => Span::styled(" LOST ", style::LOST),
            Some(GameStatus::Surrendered) => Span::styled(" SURRENDERED ", style::SURRENDERED),
        }
    }
}

impl Widget for StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let scoreboard = self.game.scoreboard();
        let session = self
            .game
            .session()
            .map_or_else(|| "-".to_owned(), |session| session.id().to_string());
        let level = self
            .level
            .map_or_else(|| "-".to_owned(), |level| level.to_string());

        let text = Text::from(vec![
            Line::from(vec![
                Span::styled("Question ", style::HELP),
                Span::raw(session),
                Span::styled("  Level ", style::HELP),
                Span::raw(level),
            ]),
            Line::from(vec![
                Span::styled("Status   ", style::HELP),
                StatusDisplay::status_span(self.game.status()),
            ]),
            Line::from(vec![
                Span::styled("Turns    ", style::HELP),
                Span::raw(format!(
                    "{} left of {TURN_LIMIT}",
                    self.game.remaining_turns()
                )),
            ]),
            Line::from(vec![
                Span::styled("Played   ", style::HELP),
                Span::raw(format!(
                    "{}  won {}  lost {}  surrendered {}",
                    scoreboard.played(),
                    scoreboard.won(),
                    scoreboard.lost(),
                    scoreboard.surrendered()
                )),
            ]),
            Line::from(vec![
                Span::styled("Streak   ", style::HELP),
                Span::raw(format!(
                    "{} (best {})",
                    scoreboard.current_streak(),
                    scoreboard.best_streak()
                )),
            ]),
        ]);

        let mut paragraph = Paragraph::new(text).style(style::DEFAULT);
        if let Some(block) = &self.block {
            paragraph = paragraph.block(block.clone());
        }
        paragraph.render(area, buf);
    }
}
