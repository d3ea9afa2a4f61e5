use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

use crate::ui::widgets::{popup_area, style};

/// Yes/no pop-up.
#[derive(Debug)]
pub struct ConfirmDialog<'a> {
    message: &'a str,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let text = Text::from(vec![
            Line::raw(self.message).centered(),
            Line::raw(""),
            Line::styled("Y: Yes | N/Esc: No", style::HELP).centered(),
        ]);
        let width = u16::try_from(self.message.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(6)
            .max(24);
        let area = popup_area(area, width, 5);

        Clear.render(area, buf);
        Paragraph::new(text)
            .block(Block::bordered().style(style::DEFAULT))
            .render(area, buf);
    }
}
