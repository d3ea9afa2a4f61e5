use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::NaiveDate;
use guessr_roster::Roster;

pub const DEFAULT_ROSTER_PATH: &str = "./data/roster.json";

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a roster file and check it for consistency
///
/// # Arguments
///
/// * `path` - Path to the roster JSON file
/// * `as_of` - Reference date for ages and date-of-birth checks
///
/// # Errors
///
/// Returns error if the file cannot be opened or parsed, or fails validation
pub fn read_roster_file<P>(path: P, as_of: NaiveDate) -> anyhow::Result<Roster>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let roster: Roster = read_json_file("roster", path)?;
    roster
        .validate(as_of)
        .with_context(|| format!("Invalid roster file: {}", path.display()))?;
    log::info!(
        "loaded roster {}: {:?}",
        path.display(),
        roster.summary()
    );
    Ok(roster)
}

/// The given reference date, or today in local time.
pub fn reference_date(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Set up `env_logger`.
///
/// `RUST_LOG` overrides the default filter. Without a log file, output goes to
/// stderr, except in interactive mode where it would draw over the terminal
/// UI and `RUST_LOG` is ignored altogether.
pub fn init_logger(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let silent = interactive && log_file.is_none();
    let mut builder = logger_builder(
        env_logger::Env::default().default_filter_or("info"),
        silent,
    );

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Failed to initialize logger")?;
    Ok(())
}

fn logger_builder(env: env_logger::Env<'_>, silent: bool) -> env_logger::Builder {
    if silent {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Off);
        builder
    } else {
        env_logger::Builder::from_env(env)
    }
}

#[cfg(test)]
mod tests {
    use log::{Level, LevelFilter, Log as _, Metadata};

    use super::*;

    // Never set, so the filter falls back to the given default.
    const UNSET_VAR: &str = "GUESSR_TEST_UNSET_LOG_FILTER";

    fn engine_info() -> Metadata<'static> {
        Metadata::builder()
            .target("guessr_engine::session")
            .level(Level::Info)
            .build()
    }

    #[test]
    fn test_silent_logger_ignores_module_directives() {
        let env = env_logger::Env::new().filter_or(UNSET_VAR, "guessr_engine=info");
        let logger = logger_builder(env, true).build();
        assert_eq!(logger.filter(), LevelFilter::Off);
        assert!(!logger.enabled(&engine_info()));
    }

    #[test]
    fn test_logger_follows_module_directives() {
        let env = env_logger::Env::new().filter_or(UNSET_VAR, "guessr_engine=info");
        let logger = logger_builder(env, false).build();
        assert!(logger.enabled(&engine_info()));
        let other = Metadata::builder()
            .target("guessr_cli")
            .level(Level::Error)
            .build();
        assert!(!logger.enabled(&other));
    }
}
