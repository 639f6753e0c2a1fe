use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub use crate::store::parse_delimiter;

#[derive(Debug, Parser)]
#[command(author, version, about = "Query Program and Results File tables in spreadsheet workbooks", long_about = None)]
pub struct Cli {
    /// YAML configuration file (workbook root, encoding, named ranges)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory holding one sub-directory per workbook (overrides the config file)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,
    /// Delimiter for named range files (defaults from the file extension)
    #[arg(long, global = true, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of named range files (defaults to utf-8)
    #[arg(long, global = true)]
    pub encoding: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the programs of a workbook, optionally for one event or race
    Programs(ProgramsArgs),
    /// List the results files of a workbook, optionally for a set of races
    ResultsFiles(ResultsFilesArgs),
}

#[derive(Debug, Args)]
pub struct ProgramsArgs {
    /// Workbook (store) ID
    #[arg(short, long)]
    pub store: String,
    /// Keep only programs of this event ID
    #[arg(short, long)]
    pub event: Option<String>,
    /// Keep only programs linked to this race ID, sorted by program ID
    #[arg(long)]
    pub race: Option<String>,
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ResultsFilesArgs {
    /// Workbook (store) ID
    #[arg(short, long)]
    pub store: String,
    /// Race IDs to keep; repeat or separate with commas
    #[arg(long = "race", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub races: Vec<String>,
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
