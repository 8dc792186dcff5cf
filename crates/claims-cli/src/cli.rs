//! CLI argument definitions for claimcheck.

use std::path::PathBuf;

use claims_model::NO_FILING_RULE;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "claimcheck",
    version,
    about = "Validate generated insurance claims against expected billing",
    long_about = "Validate generated insurance claims against expected billing.\n\n\
                  Runs the vaccine administration test matrix for a filing rule, \
                  checks the billable-claim gate, and lists the filing rules \
                  with their validation strategy."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient-identifying values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the test matrix for one filing rule.
    Run(RunArgs),

    /// Check every billable claim against the nightly billing gate.
    Gate(SourceArgs),

    /// List filing rules and the strategy each one uses.
    Rules,
}

/// Where claim data comes from.
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// Run configuration (TOML) naming a fixture directory per environment.
    #[arg(long = "config", value_name = "FILE", conflicts_with = "fixtures")]
    pub config: Option<PathBuf>,

    /// Environment table to use from the configuration (qa, stg).
    #[arg(long = "env", value_name = "NAME", default_value = "qa")]
    pub env: String,

    /// Fixture directory to read directly, with the default retry policy.
    #[arg(long = "fixtures", value_name = "DIR")]
    pub fixtures: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Filing rule to validate ("None" for claims filed without one).
    #[arg(long = "filing-rule", value_name = "NAME", default_value = NO_FILING_RULE)]
    pub filing_rule: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
