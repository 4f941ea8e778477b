use clap::{Args, Parser, Subcommand};
use esdc_core::dataname::LadderKind;
use std::path::PathBuf;

/// esdc - Compliance checks for Earth-science granule filenames
#[derive(Parser, Debug)]
#[command(name = "esdc")]
#[command(about = "Compliance checks for Earth-science granule filenames", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// ISO-8601 pattern ladder used when no datetime pattern is given
    #[arg(long, global = true, value_name = "LADDER")]
    pub iso_ladder: Option<LadderArg>,

    #[command(subcommand)]
    pub command: Commands,
}

/// ISO ladder selection
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LadderArg {
    /// Accepts hour, minute and second "00"
    Standard,
    /// Rejects "00" components
    Legacy,
}

impl From<LadderArg> for LadderKind {
    fn from(arg: LadderArg) -> Self {
        match arg {
            LadderArg::Standard => LadderKind::Standard,
            LadderArg::Legacy => LadderKind::Legacy,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the composite release identifier (CRID)
    Crid(CridArgs),

    /// Check the date-time fields of the filename
    Datetime(DateTimeArgs),

    /// Report filenames shared by more than one dataset of a collection
    Uniqueness(UniquenessArgs),

    /// Check the file extension against the detected format
    Extension(ExtensionArgs),

    /// Show the effective configuration and where each value comes from
    Config,
}

/// A single dataset or a list file of datasets
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Dataset file path or driver-qualified subdataset name
    #[arg(long, value_name = "NAME")]
    pub dataset_name: Option<String>,

    /// File listing one dataset or glob pattern per line
    #[arg(long, value_name = "FILE")]
    pub dataset_name_list: Option<String>,
}

/// Resolved target selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Single(&'a str),
    List(&'a str),
}

impl TargetArgs {
    pub fn target(&self) -> Target<'_> {
        match (&self.dataset_name, &self.dataset_name_list) {
            (_, Some(list)) => Target::List(list),
            (Some(name), None) => Target::Single(name),
            // The argument group requires one of the two
            (None, None) => Target::List(""),
        }
    }
}

#[derive(Parser, Debug)]
pub struct CridArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Regex locating the CRID substring in the filename
    #[arg(long, value_name = "REGEX")]
    pub dataset_crid: Option<String>,

    /// Regex extracting the major version from the CRID
    #[arg(long, value_name = "REGEX")]
    pub dataset_crid_major: Option<String>,

    /// Capture group name of the major version
    #[arg(long, value_name = "GROUP")]
    pub dataset_crid_major_group: Option<String>,

    /// Regex extracting the minor version from the CRID
    #[arg(long, value_name = "REGEX")]
    pub dataset_crid_minor: Option<String>,

    /// Capture group name of the minor version
    #[arg(long, value_name = "GROUP")]
    pub dataset_crid_minor_group: Option<String>,

    /// Regex extracting the patch version from the CRID
    #[arg(long, value_name = "REGEX")]
    pub dataset_crid_patch: Option<String>,

    /// Capture group name of the patch version
    #[arg(long, value_name = "GROUP")]
    pub dataset_crid_patch_group: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DateTimeArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Regex for the temporal extent; auto-detected when omitted
    #[arg(long, value_name = "REGEX")]
    pub dataset_datetime: Option<String>,

    /// Up to two comma-separated group names (begin, end)
    #[arg(long, value_name = "GROUPS")]
    pub dataset_datetime_group: Option<String>,

    /// Regex for the production date-time
    #[arg(long, value_name = "REGEX")]
    pub dataset_pdt: Option<String>,

    /// Group name for the production date-time
    #[arg(long, value_name = "GROUP")]
    pub dataset_pdt_group: Option<String>,

    /// Further date-time expressions joined with "++"
    #[arg(long, value_name = "REGEXES")]
    pub dataset_datetime_fields: Option<String>,

    /// Group lists for the further expressions, joined with ";"
    #[arg(long, value_name = "GROUPS")]
    pub dataset_datetime_fields_groups: Option<String>,
}

#[derive(Parser, Debug)]
pub struct UniquenessArgs {
    /// File listing one dataset or glob pattern per line
    #[arg(long, value_name = "FILE")]
    pub dataset_name_list: String,

    /// Regex for the dataset identifier
    #[arg(long, value_name = "REGEX")]
    pub dataset_id: Option<String>,

    /// Regex for the CRID substring
    #[arg(long, value_name = "REGEX")]
    pub dataset_crid: Option<String>,

    /// Regex for the date-time substring
    #[arg(long, value_name = "REGEX")]
    pub dataset_datetime: Option<String>,

    /// Regex for the production date-time substring
    #[arg(long, value_name = "REGEX")]
    pub dataset_pdt: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ExtensionArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}
