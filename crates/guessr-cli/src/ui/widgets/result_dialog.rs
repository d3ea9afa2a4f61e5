use guessr_engine::{GameStatus, Player};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

use crate::ui::widgets::{popup_area, style};

/// Pop-up shown when a session ends, revealing the target.
#[derive(Debug)]
pub struct ResultDialog<'a> {
    status: GameStatus,
    target: &'a Player,
    turns_used: usize,
}

impl<'a> ResultDialog<'a> {
    pub fn new(status: GameStatus, target: &'a Player, turns_used: usize) -> Self {
        Self {
            status,
            target,
            turns_used,
        }
    }

    fn headline(&self) -> (String, Style) {
        match self.status {
            GameStatus::Won if self.turns_used == 1 => {
                ("Got it in one!".to_owned(), style::WON)
            }
            GameStatus::Won => (format!("Got it in {} guesses!", self.turns_used), style::WON),
            GameStatus::Lost => ("Out of guesses".to_owned(), style::LOST),
            GameStatus::Surrendered => ("You gave up".to_owned(), style::SURRENDERED),
            GameStatus::InProgress => ("In progress".to_owned(), style::DEFAULT),
        }
    }
}

impl Widget for ResultDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &ResultDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let (headline, headline_style) = self.headline();
        let player = self.target;
        let text = Text::from(vec![
            Line::styled(headline, headline_style).centered(),
            Line::raw(""),
            Line::styled(player.name.clone(), style::HIGHLIGHT).centered(),
            Line::raw(format!("Nation    {}", player.nation.name)),
            Line::raw(format!("League    {}", player.league.name)),
            Line::raw(format!("Club      {}", player.team.name)),
            Line::raw(format!("Position  {}", player.position.full_name())),
            Line::raw(format!("Age       {}", player.age)),
            Line::raw(format!("Shirt     #{}", player.shirt_number)),
            Line::raw(""),
            Line::styled("Enter: Close | N: New question", style::HELP).centered(),
        ]);

        let block = Block::bordered()
            .title(Line::from("ANSWER").centered())
            .padding(Padding::horizontal(1))
            .style(style::DEFAULT);
        let height = u16::try_from(text.height()).unwrap_or(u16::MAX).saturating_add(2);
        let area = popup_area(area, 44, height);

        Clear.render(area, buf);
        Paragraph::new(text).block(block).render(area, buf);
    }
}
