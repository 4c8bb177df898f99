use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wh_cli::commands::{
    add, calendar, delete, export, import, list, report, status, summary, util,
};
use wh_cli::{Cli, Commands, Config};

/// Load config and open the store, ensuring the parent directory exists.
fn open_store(config_path: Option<&Path>) -> Result<(wh_store::Store, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let store = util::open_store(&config)?;
    Ok((store, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (mut store, config) = open_store(cli.config.as_deref())?;
    let today = Local::now().date_naive();
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Add(args) => add::run(&mut stdout, args, &mut store)?,
        Commands::Edit(args) => add::edit(&mut stdout, args, &mut store)?,
        Commands::Delete { id } => delete::run(&mut stdout, id, &mut store)?,
        Commands::DeleteDay { date } => delete::remove_day(&mut stdout, *date, &mut store)?,
        Commands::Clear { yes } => delete::clear(&mut stdout, *yes, &mut store)?,
        Commands::List(args) => list::run(&mut stdout, args, &store, today)?,
        Commands::Day { date } => list::day(&mut stdout, *date, &store)?,
        Commands::Calendar(args) => calendar::run(&mut stdout, args, &store, today)?,
        Commands::Summary(args) => summary::run(&mut stdout, args, &store, today)?,
        Commands::Stats(args) => summary::stats(&mut stdout, args, &store, today)?,
        Commands::Import(args) => import::run(&mut stdout, args, &mut store)?,
        Commands::Export(args) => export::run(&mut stdout, args, &store, &config, today)?,
        Commands::Report(args) => report::run(&mut stdout, args, &store)?,
        Commands::Status => status::run(&mut stdout, &store, &config.database_path)?,
    }

    stdout.flush()?;
    Ok(())
}
