pub mod cli;
pub mod config;
pub mod data;
pub mod filter;
pub mod join;
pub mod program;
pub mod results_file;
pub mod rows;
pub mod store;
pub mod table;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};
use serde::Serialize;

use crate::{
    cli::{Cli, Commands, OutputFormat, ProgramsArgs, ResultsFilesArgs},
    config::Config,
    data::Record,
    join::{Race, race_programs},
    store::{WorkbookStore, resolve_encoding},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("race_tables", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let store = build_store(&cli, &config)?;
    match &cli.command {
        Commands::Programs(args) => handle_programs(args, &config, &store),
        Commands::ResultsFiles(args) => handle_results_files(args, &config, &store),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load(path)
                .with_context(|| format!("Loading configuration from {path:?}"))?;
            config.resolve_root(path.parent().unwrap_or_else(|| Path::new(".")));
            config
        }
        None => Config::default(),
    };
    if let Some(root) = &cli.root {
        config.workbook_root = root.clone();
    }
    debug!("Using configuration {config:?}");
    Ok(config)
}

fn build_store(cli: &Cli, config: &Config) -> Result<WorkbookStore> {
    let mut store = config.workbook_store()?;
    debug!("Reading workbooks under {:?}", store.root());
    if let Some(delimiter) = cli.delimiter {
        store = store.with_delimiter(Some(delimiter));
    }
    if let Some(label) = cli.encoding.as_deref() {
        store = store.with_encoding(resolve_encoding(Some(label))?);
    }
    Ok(store)
}

fn handle_programs(args: &ProgramsArgs, config: &Config, store: &WorkbookStore) -> Result<()> {
    let reader = config.program_reader();
    let mut programs = match &args.event {
        Some(event) => reader.load_by_event(store, &args.store, event),
        None => reader.load(store, &args.store),
    };
    if let Some(race) = &args.race {
        let relationships = config
            .relationship_reader()
            .load(store, &args.store)
            .with_context(|| format!("Resolving programs of race '{race}'"))?;
        programs = race_programs(&programs, &relationships, &Race::new(race));
    }
    info!(
        "{} program(s) found in workbook '{}'",
        programs.len(),
        args.store
    );
    emit(
        args.format,
        &programs,
        programs.iter().map(|program| program.record()),
    )
}

fn handle_results_files(
    args: &ResultsFilesArgs,
    config: &Config,
    store: &WorkbookStore,
) -> Result<()> {
    let reader = config.results_file_reader();
    let files = if args.races.is_empty() {
        reader.load(store, &args.store)?
    } else {
        reader.load_by_race_ids(store, &args.store, &args.races)?
    };
    info!(
        "{} results file(s) found in workbook '{}'",
        files.len(),
        args.store
    );
    emit(args.format, &files, files.iter().map(|file| file.record()))
}

fn emit<'a, T, I>(format: OutputFormat, items: &T, records: I) -> Result<()>
where
    T: Serialize + ?Sized,
    I: IntoIterator<Item = &'a Record>,
{
    match format {
        OutputFormat::Table => print!("{}", table::render_records(records)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).context("Serializing records to JSON")?;
            println!("{json}");
        }
    }
    Ok(())
}
