use ratatui::layout::{Constraint, Rect};

pub use self::{
    confirm_dialog::*, guess_history_display::*, result_dialog::*, status_display::*,
};

mod confirm_dialog;
mod guess_history_display;
mod result_dialog;
mod status_display;

mod color {
    use ratatui::style::Color;

    pub const GREEN: Color = Color::Rgb(0, 200, 0);
    pub const RED: Color = Color::Rgb(220, 0, 0);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const HELP: Style = Style::new().fg(color::GRAY);
    pub const HEADER: Style = Style::new().fg(color::YELLOW).add_modifier(Modifier::BOLD);
    pub const HIGHLIGHT: Style = Style::new().fg(color::YELLOW).add_modifier(Modifier::BOLD);

    pub const MATCH: Style = fg_bg(color::BLACK, color::GREEN);
    pub const MISS: Style = fg_bg(color::WHITE, color::DARK_GRAY);
    pub const REVEALED: Style = Style::new().fg(color::YELLOW).add_modifier(Modifier::ITALIC);

    pub const WON: Style = fg_bg(color::BLACK, color::GREEN);
    pub const LOST: Style = fg_bg(color::WHITE, color::RED);
    pub const SURRENDERED: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const ERROR: Style = Style::new().fg(color::RED);
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    area.centered(
        Constraint::Length(width.min(area.width)),
        Constraint::Length(height.min(area.height)),
    )
}
