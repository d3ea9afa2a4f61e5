use guessr_engine::{Attribute, GuessResult, Hint, Outcome, Player};
use ratatui::{
    layout::Constraint,
    prelude::{Buffer, Rect},
    text::Line,
    widgets::{Block, Cell, Row, Table, Widget},
};

use crate::ui::widgets::style;

/// Guess history as a table, newest guess on top.
///
/// Each attribute cell is green on a match. Age and shirt number carry an
/// arrow pointing towards the target's value.
#[derive(Debug)]
pub struct GuessHistoryDisplay<'a> {
    history: &'a [GuessResult],
    block: Option<Block<'a>>,
}

impl<'a> GuessHistoryDisplay<'a> {
    pub fn new(history: &'a [GuessResult]) -> Self {
        Self {
            history,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

fn attribute_text(player: &Player, attribute: Attribute) -> String {
    match attribute {
        Attribute::Nation => player.nation.name.clone(),
        Attribute::League => player.league.name.clone(),
        Attribute::Team => player.team.name.clone(),
        Attribute::Position => player.position.to_string(),
        Attribute::Age => player.age.to_string(),
        Attribute::ShirtNumber => format!("#{}", player.shirt_number),
    }
}

fn outcome_cell(text: String, outcome: Outcome) -> Cell<'static> {
    let text = match outcome.hint() {
        Some(Hint::Higher) => format!("{text} ↑"),
        Some(Hint::Lower) => format!("{text} ↓"),
        None => text,
    };
    let style = if outcome.is_match() {
        style::MATCH
    } else {
        style::MISS
    };
    Cell::from(text).style(style)
}

fn result_row(number: usize, result: &GuessResult) -> Row<'static> {
    let player = result.player();
    let (label, name_style) = if result.kind().is_revealed() {
        ("ans".to_owned(), style::REVEALED)
    } else if result.is_correct_guess() {
        (number.to_string(), style::MATCH)
    } else {
        (number.to_string(), style::DEFAULT)
    };

    let mut cells = vec![
        Cell::from(label).style(style::HELP),
        Cell::from(player.name.clone()).style(name_style),
    ];
    cells.extend(
        result
            .outcomes()
            .iter()
            .map(|(attribute, outcome)| outcome_cell(attribute_text(player, attribute), outcome)),
    );
    Row::new(cells)
}

impl Widget for GuessHistoryDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GuessHistoryDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let submitted = self
            .history
            .iter()
            .filter(|result| !result.kind().is_revealed())
            .count();
        let mut number = submitted + 1;
        let rows = self.history.iter().map(|result| {
            if !result.kind().is_revealed() {
                number -= 1;
            }
            result_row(number, result)
        });

        let header = Row::new(
            ["", "Player", "Nation", "League", "Club", "Pos", "Age", "No."]
                .map(|title| Cell::from(Line::from(title))),
        )
        .style(style::HEADER);

        let widths = [
            Constraint::Length(3),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(6),
        ];

        let mut table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .style(style::DEFAULT);
        if let Some(block) = &self.block {
            table = table.block(block.clone());
        }
        Widget::render(table, area, buf);
    }
}
