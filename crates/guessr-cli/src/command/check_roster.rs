use std::path::PathBuf;

use chrono::NaiveDate;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CheckRosterArg {
    /// Path to the roster file (JSON format)
    roster: PathBuf,
    /// Reference date for ages and date-of-birth checks (YYYY-MM-DD); today if omitted
    #[clap(long)]
    as_of: Option<NaiveDate>,
    /// Write the summary to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CheckRosterArg) -> anyhow::Result<()> {
    let CheckRosterArg {
        roster,
        as_of,
        output,
    } = arg;

    let as_of = util::reference_date(*as_of);
    let summary = util::read_roster_file(roster, as_of)?.summary();
    eprintln!("Roster {} is valid as of {as_of}", roster.display());
    Output::save_json(&summary, output.clone())?;
    Ok(())
}
