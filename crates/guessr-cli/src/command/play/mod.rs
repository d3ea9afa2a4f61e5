use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use guessr_roster::{QuestionLevel, QuestionSeed, RosterQuestionProvider};

use crate::{command::play::app::PlayApp, util};

mod app;
mod screens;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to the roster file (JSON format)
    #[clap(long, default_value = util::DEFAULT_ROSTER_PATH)]
    roster: PathBuf,
    /// Seed for question selection (32 hex characters); random if omitted
    #[clap(long)]
    seed: Option<QuestionSeed>,
    /// Only ask questions of this level
    #[clap(long)]
    level: Option<QuestionLevel>,
    /// Date used to compute player ages (YYYY-MM-DD); today if omitted
    #[clap(long)]
    as_of: Option<NaiveDate>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            roster: PathBuf::from(util::DEFAULT_ROSTER_PATH),
            seed: None,
            level: None,
            as_of: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        roster,
        seed,
        level,
        as_of,
    } = arg;

    let as_of = util::reference_date(*as_of);
    let roster = Arc::new(util::read_roster_file(roster, as_of)?);
    let provider = match seed {
        Some(seed) => RosterQuestionProvider::with_seed(Arc::clone(&roster), as_of, *seed),
        None => RosterQuestionProvider::new(Arc::clone(&roster), as_of),
    }
    .level(*level);

    let mut app = PlayApp::new(roster, as_of, provider);
    ratatui::run(|terminal| app.run(terminal))?;

    let scoreboard = app.scoreboard();
    if scoreboard.played() > 0 {
        eprintln!(
            "Played {}: won {}, lost {}, surrendered {} (best streak {})",
            scoreboard.played(),
            scoreboard.won(),
            scoreboard.lost(),
            scoreboard.surrendered(),
            scoreboard.best_streak()
        );
    }
    Ok(())
}
