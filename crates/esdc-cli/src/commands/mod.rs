//! Command implementations

mod config;
mod crid;
mod datetime;
mod extension;
mod uniqueness;

use crate::cli::{Cli, Commands, Target};
use crate::errors;
use crate::output::OutputWriter;
use anyhow::Result;
use esdc_core::collection::Verdict;
use esdc_core::config::{CliConfigOverrides, LayeredConfig};
use esdc_core::dataname::LadderKind;
use esdc_core::models::CollectionResult;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use tabled::Tabled;

/// Verdict of one invocation, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    Pass,
    Skip,
    Fail,
    Error,
}

impl Outcome {
    pub fn of<T: Verdict + ?Sized>(record: &T) -> Self {
        if record.has_error() {
            Outcome::Error
        } else if record.is_failure() {
            Outcome::Fail
        } else if record.is_skipped() {
            Outcome::Skip
        } else {
            Outcome::Pass
        }
    }

    /// Worst member outcome. Collections only keep failed and errored members.
    pub fn of_collection<T: Verdict>(result: &CollectionResult<T>) -> Self {
        if result.error.is_some() {
            return Outcome::Error;
        }

        let idle = if result.valid.skip { Outcome::Skip } else { Outcome::Pass };
        result.datasets.iter().map(Outcome::of).max().unwrap_or(idle)
    }

    pub fn code(self) -> u8 {
        match self {
            Outcome::Pass | Outcome::Skip => 0,
            Outcome::Fail => 1,
            Outcome::Error => 2,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Pass => "pass",
            Outcome::Skip => "skip",
            Outcome::Fail => "fail",
            Outcome::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// Options shared by every command
pub struct Settings {
    pub config_file: Option<PathBuf>,
    pub iso_ladder: Option<LadderKind>,
}

impl Settings {
    /// Defaults, then the config file, then the environment, then the CLI
    pub fn load(&self, mut overrides: CliConfigOverrides) -> Result<LayeredConfig> {
        let mut config = LayeredConfig::with_defaults();
        if let Some(ref path) = self.config_file {
            config = config.load_from_file(path)?;
        }
        let mut config = config.load_from_env();

        overrides.iso_ladder = self.iso_ladder;
        config.update_from_cli(overrides);
        Ok(config)
    }
}

/// One line of a human-readable report
#[derive(Tabled)]
pub struct FindingRow {
    #[tabled(rename = "Dataset")]
    pub dataset: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Detail")]
    pub detail: String,
}

/// A per-file record that can be summarised on one report line
pub trait Finding: Verdict + Serialize {
    fn dataset(&self) -> &str;

    fn detail(&self) -> String;

    fn row(&self) -> FindingRow {
        FindingRow {
            dataset: self.dataset().to_string(),
            status: Outcome::of(self).to_string(),
            detail: self.detail(),
        }
    }
}

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<Outcome> {
    let output = OutputWriter::new(cli.json);
    let settings = Settings {
        config_file: cli.config,
        iso_ladder: cli.iso_ladder.map(Into::into),
    };

    match cli.command {
        Commands::Crid(args) => crid::execute(args, &settings, &output),
        Commands::Datetime(args) => datetime::execute(args, &settings, &output),
        Commands::Uniqueness(args) => uniqueness::execute(args, &settings, &output),
        Commands::Extension(args) => extension::execute(args, &settings, &output),
        Commands::Config => config::execute(&settings, &output),
    }
}

/// Check a single dataset or every dataset of a list file with the same rule
pub(crate) fn run<T, S, C>(
    target: Target<'_>,
    rule: &str,
    output: &OutputWriter,
    single: S,
    collection: C,
) -> Result<Outcome>
where
    T: Finding,
    S: FnOnce(&str) -> T,
    C: FnOnce(&str) -> CollectionResult<T>,
{
    match target {
        Target::Single(name) => {
            let record = single(name);
            let outcome = Outcome::of(&record);
            report_single(output, rule, &record, outcome)?;
            Ok(outcome)
        }
        Target::List(list) => {
            let result = collection(list);
            let outcome = Outcome::of_collection(&result);
            report_collection(output, rule, &result, outcome)?;
            Ok(outcome)
        }
    }
}

pub(crate) fn report_single<T: Finding>(
    output: &OutputWriter,
    rule: &str,
    record: &T,
    outcome: Outcome,
) -> Result<()> {
    if output.is_json() {
        return output.result(outcome, record);
    }

    output.section(format!("{} check", rule));
    output.kv("Dataset", record.dataset());
    let detail = record.detail();
    if !detail.is_empty() {
        output.kv("Detail", detail);
    }
    summarize(output, rule, outcome);
    Ok(())
}

pub(crate) fn report_collection<T: Finding>(
    output: &OutputWriter,
    rule: &str,
    result: &CollectionResult<T>,
    outcome: Outcome,
) -> Result<()> {
    if output.is_json() {
        return output.result(outcome, result);
    }

    output.section(format!("{} check", rule));
    output.kv("Collection", &result.collection_name);
    if let Some(ref error) = result.error {
        output.kv("Error", error);
    } else if !result.is_empty() {
        output.table(result.datasets.iter().map(|d| d.row()).collect::<Vec<_>>());
    }
    summarize(output, rule, outcome);
    Ok(())
}

/// Final verdict line for human output
pub(crate) fn summarize(output: &OutputWriter, rule: &str, outcome: Outcome) {
    match outcome {
        Outcome::Pass => output.success(format!("{} check passed", rule)),
        Outcome::Skip => output.info(format!("{} check skipped", rule)),
        Outcome::Fail => output.warning(format!("{} check failed", rule)),
        Outcome::Error => output.error(format!("{} check could not be completed", rule)),
    }
}

/// Build the ladder selected by the configuration
pub(crate) fn ladder(config: &LayeredConfig) -> Result<esdc_core::dataname::IsoLadder> {
    config
        .ladder()
        .map_err(|e| errors::ladder_unavailable(&e.to_string()).into())
}
