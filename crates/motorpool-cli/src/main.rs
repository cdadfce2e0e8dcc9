mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{columns, completions, drivers, export, import, uploads, Context};
use crate::error::{exit_code_for, report_error};
use motorpool_config as config;
use motorpool_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "motorpool", version, about = "motorpool fleet roster CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Ingest a roster spreadsheet
    Import(import::ImportArgs),
    Add(drivers::AddArgs),
    Edit(drivers::EditArgs),
    Show(drivers::ShowArgs),
    List(drivers::ListArgs),
    Delete(drivers::DeleteArgs),
    Export(export::ExportArgs),
    #[command(subcommand)]
    Columns(columns::ColumnsCommand),
    /// Upload audit trail, newest first
    Uploads(uploads::UploadsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path.clone()) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }
            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;

            if verbose {
                debug!(path = %db_path.display(), "database path resolved");
            }

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let ctx = Context {
                store: &store,
                json,
                config: &app_config,
                config_path,
            };

            match command {
                Command::Import(args) => import::import_file(&ctx, args),
                Command::Add(args) => drivers::add_driver(&ctx, args),
                Command::Edit(args) => drivers::edit_driver(&ctx, args),
                Command::Show(args) => drivers::show_driver(&ctx, args),
                Command::List(args) => drivers::list_drivers(&ctx, args),
                Command::Delete(args) => drivers::delete_drivers(&ctx, args),
                Command::Export(args) => export::export_roster(&ctx, args),
                Command::Columns(cmd) => match cmd {
                    columns::ColumnsCommand::Show(args) => columns::show_columns(&ctx, args),
                    columns::ColumnsCommand::Set(args) => columns::set_columns(&ctx, args),
                    columns::ColumnsCommand::Reset(args) => columns::reset_columns(&ctx, args),
                },
                Command::Uploads(args) => uploads::list_uploads(&ctx, args),
                Command::Completions(_) => {
                    unreachable!("completions command handled before store initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
