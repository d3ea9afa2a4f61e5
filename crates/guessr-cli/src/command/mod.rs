use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{check_roster::CheckRosterArg, evaluate::EvaluateArg, play::PlayArg};
use crate::util;

mod check_roster;
mod evaluate;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write log output to this file (filter with `RUST_LOG`)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Validate a roster file and print a summary
    CheckRoster(#[clap(flatten)] CheckRosterArg),
    /// Run a scripted sequence of guesses and print the resulting session
    Evaluate(#[clap(flatten)] EvaluateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Play(PlayArg::default()));

    let interactive = matches!(mode, Mode::Play(_));
    util::init_logger(args.log_file.as_deref(), interactive)?;

    match mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::CheckRoster(arg) => check_roster::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_play() {
        let args = CommandArgs::try_parse_from(["guessr"]).unwrap();
        assert!(args.mode.is_none());
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_log_file_is_global() {
        let args =
            CommandArgs::try_parse_from(["guessr", "check-roster", "r.json", "--log-file", "x.log"])
                .unwrap();
        assert_eq!(args.log_file, Some(PathBuf::from("x.log")));
        assert!(matches!(args.mode, Some(Mode::CheckRoster(_))));
    }

    #[test]
    fn test_play_options() {
        let args = CommandArgs::try_parse_from([
            "guessr",
            "play",
            "--level",
            "hard",
            "--seed",
            "0123456789abcdef0123456789abcdef",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::Play(_))));

        let bad_seed = CommandArgs::try_parse_from(["guessr", "play", "--seed", "xyz"]);
        assert!(bad_seed.is_err());
        let bad_level = CommandArgs::try_parse_from(["guessr", "play", "--level", "extreme"]);
        assert!(bad_level.is_err());
    }

    #[test]
    fn test_evaluate_requires_target() {
        let args = CommandArgs::try_parse_from(["guessr", "evaluate", "saka", "rice"]);
        assert!(args.is_err());
        let args =
            CommandArgs::try_parse_from(["guessr", "evaluate", "--target", "vini", "saka", "rice"])
                .unwrap();
        assert!(matches!(args.mode, Some(Mode::Evaluate(_))));
    }
}
