use std::sync::Arc;

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use guessr_engine::{Game, GameSession, Player, Scoreboard, SessionId};
use guessr_roster::{
    CandidatePicker, QuestionLevel, QuestionProvider as _, Roster, RosterQuestionProvider,
};
use log::warn;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    text::{Line, Text},
    widgets::Block,
};

use crate::{
    command::play::screens::{PickerAction, PickerScreen},
    ui::widgets::{ConfirmDialog, GuessHistoryDisplay, ResultDialog, StatusDisplay, style},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Main,
    Picker,
    Confirm(Confirm),
    Result,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Confirm {
    Surrender,
    NewQuestion,
}

impl Confirm {
    fn message(self) -> &'static str {
        match self {
            Confirm::Surrender => "Give up and reveal the answer?",
            Confirm::NewQuestion => "Abandon this question and start a new one?",
        }
    }
}

#[derive(Debug)]
pub struct PlayApp {
    game: Game,
    provider: RosterQuestionProvider,
    level: Option<QuestionLevel>,
    picker_screen: PickerScreen,
    screen: Screen,
    notice: Option<String>,
}

impl PlayApp {
    pub fn new(roster: Arc<Roster>, as_of: NaiveDate, provider: RosterQuestionProvider) -> Self {
        let mut app = Self {
            game: Game::new(),
            provider,
            level: None,
            picker_screen: PickerScreen::new(CandidatePicker::new(roster, as_of)),
            screen: Screen::Main,
            notice: None,
        };
        app.new_question();
        app
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        self.game.scoreboard()
    }

    pub(crate) fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while self.screen != Screen::Exiting {
            terminal.draw(|f| self.draw(f))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn is_in_progress(&self) -> bool {
        self.game.status().is_some_and(|status| status.is_in_progress())
    }

    fn new_question(&mut self) {
        match self.provider.fetch_random() {
            Ok(question) => {
                self.level = Some(question.level);
                self.game.start(question.player);
                self.notice = None;
            }
            Err(e) => {
                warn!("failed to fetch a question: {e}");
                self.game.reset();
                self.level = None;
                self.notice = Some(format!("Could not load a question: {e}"));
            }
        }
        self.screen = Screen::Main;
    }

    fn submit_guess(&mut self, session_id: SessionId, player: &Player) {
        if let Err(e) = self.game.submit_guess(session_id, player) {
            self.notice = Some(format!("Guess not counted: {e}"));
        }
        self.show_result_if_finished();
    }

    fn surrender(&mut self) {
        let Some(session_id) = self.game.session().map(GameSession::id) else {
            return;
        };
        if let Err(e) = self.game.surrender(session_id) {
            self.notice = Some(format!("Cannot surrender: {e}"));
        }
        self.show_result_if_finished();
    }

    fn show_result_if_finished(&mut self) {
        self.screen = if self.game.target().is_some() {
            Screen::Result
        } else {
            Screen::Main
        };
    }

    fn draw(&self, frame: &mut Frame) {
        let status = StatusDisplay::new(&self.game)
            .level(self.level)
            .block(Block::bordered().title(Line::from("GUESS THE PLAYER").centered()));
        let [status_area, notice_area, main_area, help_area] = Layout::vertical([
            Constraint::Length(status.height()),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(&status, status_area);
        if let Some(notice) = &self.notice {
            frame.render_widget(Text::styled(notice.as_str(), style::ERROR), notice_area);
        }

        if self.screen == Screen::Picker {
            self.picker_screen.draw(frame, main_area);
        } else {
            let history = GuessHistoryDisplay::new(self.game.history())
                .block(Block::bordered().title("Guesses"));
            frame.render_widget(&history, main_area);
        }

        match self.screen {
            Screen::Confirm(confirm) => {
                frame.render_widget(ConfirmDialog::new(confirm.message()), main_area);
            }
            Screen::Result => {
                if let (Some(status), Some(target), Some(session)) = (
                    self.game.status(),
                    self.game.target(),
                    self.game.session(),
                ) {
                    let dialog = ResultDialog::new(status, target, session.turns_used());
                    frame.render_widget(&dialog, main_area);
                }
            }
            Screen::Main | Screen::Picker | Screen::Exiting => {}
        }

        let help_text = match self.screen {
            Screen::Picker => PickerScreen::HELP,
            Screen::Main if self.is_in_progress() => {
                "G: Guess | S: Surrender | N: New question | Q: Quit"
            }
            Screen::Main if self.game.target().is_some() => {
                "R: Show answer | N: New question | Q: Quit"
            }
            _ => "N: New question | Q: Quit",
        };
        frame.render_widget(Text::styled(help_text, style::HELP).centered(), help_area);
    }

    fn handle_events(&mut self) -> anyhow::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match self.screen {
            Screen::Main => self.handle_main_key(key_event),
            Screen::Picker => match self.picker_screen.handle_key(key_event) {
                PickerAction::None => {}
                PickerAction::Cancel => self.screen = Screen::Main,
                PickerAction::Pick(session_id, player) => self.submit_guess(session_id, &player),
            },
            Screen::Confirm(confirm) => match key_event.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => match confirm {
                    Confirm::Surrender => self.surrender(),
                    Confirm::NewQuestion => self.new_question(),
                },
                KeyCode::Char('n' | 'N') | KeyCode::Esc => self.screen = Screen::Main,
                _ => {}
            },
            Screen::Result => match key_event.code {
                KeyCode::Enter | KeyCode::Esc => self.screen = Screen::Main,
                KeyCode::Char('n') => self.new_question(),
                KeyCode::Char('q') => self.screen = Screen::Exiting,
                _ => {}
            },
            Screen::Exiting => {}
        }
    }

    fn handle_main_key(&mut self, key_event: KeyEvent) {
        let in_progress = self.is_in_progress();
        match key_event.code {
            KeyCode::Char('g') if in_progress => {
                if let Some(session) = self.game.session() {
                    self.picker_screen.open(session.id());
                    self.notice = None;
                    self.screen = Screen::Picker;
                }
            }
            KeyCode::Char('s') if in_progress => self.screen = Screen::Confirm(Confirm::Surrender),
            KeyCode::Char('n') if in_progress => {
                self.screen = Screen::Confirm(Confirm::NewQuestion);
            }
            KeyCode::Char('n') => self.new_question(),
            KeyCode::Char('r') if self.game.target().is_some() => self.screen = Screen::Result,
            KeyCode::Char('q') => self.screen = Screen::Exiting,
            _ => {}
        }
    }
}
