use std::path::PathBuf;

use anyhow::Context as _;
use chrono::NaiveDate;
use guessr_engine::{Game, GameError, GameStatus, GuessResult, Player, PlayerId};
use guessr_roster::Roster;
use log::{info, warn};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Path to the roster file (JSON format)
    #[clap(long, default_value = util::DEFAULT_ROSTER_PATH)]
    roster: PathBuf,
    /// Id of the player to guess
    #[clap(long)]
    target: String,
    /// Ids of the guessed players, in order
    guesses: Vec<String>,
    /// Surrender if the guesses run out without ending the session
    #[clap(long)]
    surrender: bool,
    /// Date used to compute player ages (YYYY-MM-DD); today if omitted
    #[clap(long)]
    as_of: Option<NaiveDate>,
    /// Write the result to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

/// Final state of a scripted session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluateReport {
    status: GameStatus,
    turns_used: usize,
    remaining_turns: usize,
    /// Most recent first.
    history: Vec<GuessResult>,
    /// Hidden while the session is still in progress.
    target: Option<Player>,
    /// Guesses that came after the session had ended.
    ignored_guesses: Vec<PlayerId>,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        roster,
        target,
        guesses,
        surrender,
        as_of,
        output,
    } = arg;

    let as_of = util::reference_date(*as_of);
    let roster = util::read_roster_file(roster, as_of)?;
    let report = evaluate_guesses(&roster, as_of, target, guesses, *surrender)?;
    Output::save_json(&report, output.clone())?;
    Ok(())
}

/// Plays `guesses` in order against `target`.
///
/// Guesses made after the session has ended are reported, not applied.
/// With `surrender`, a session still in progress after the last guess is
/// given up.
fn evaluate_guesses(
    roster: &Roster,
    as_of: NaiveDate,
    target: &str,
    guesses: &[String],
    surrender: bool,
) -> anyhow::Result<EvaluateReport> {
    let resolve = |id: &str| {
        roster
            .resolve_player(&PlayerId::new(id), as_of)
            .with_context(|| format!("Cannot resolve player `{id}`"))
    };

    let mut game = Game::new();
    let session_id = game.start(resolve(target)?);

    let mut ignored_guesses = vec![];
    for id in guesses {
        let candidate = resolve(id.as_str())?;
        match game.submit_guess(session_id, &candidate) {
            Ok(result) => info!(
                "guess {} -> {}",
                candidate.name,
                if result.is_correct_guess() { "correct" } else { "wrong" }
            ),
            Err(GameError::SessionEnded(e)) => {
                warn!("ignoring guess {id}: {e}");
                ignored_guesses.push(candidate.id);
            }
            Err(e) => return Err(e).context("Failed to submit guess"),
        }
    }

    if surrender && game.status().is_some_and(|status| status.is_in_progress()) {
        game.surrender(session_id).context("Failed to surrender")?;
    }

    let session = game
        .session()
        .context("Session disappeared while evaluating")?;
    Ok(EvaluateReport {
        status: session.status(),
        turns_used: session.turns_used(),
        remaining_turns: session.remaining_turns(),
        history: session.history().to_vec(),
        target: session.target().cloned(),
        ignored_guesses,
    })
}
