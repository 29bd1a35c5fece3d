use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use learnova_engine::{TourCatalog, TourConfig, TourContext};
use learnova_tui::RunOptions;
use learnova_util::{DurableStore, JsonFileStore, default_log_path};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Training coordinator dashboard with a guided onboarding tour.
#[derive(Parser, Debug)]
#[command(name = "learnova", version, about)]
struct Cli {
    /// Durable tour state file (defaults to LEARNOVA_STORE_PATH or the config directory)
    #[arg(long, global = true, value_name = "PATH")]
    store_path: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the dashboard (the default)
    Run(RunArgs),
    /// Inspect or reset the onboarding tour
    #[command(subcommand)]
    Tour(TourAction),
}

#[derive(clap::Args, Debug, Default)]
struct RunArgs {
    /// Start the tour right away in demo mode
    #[arg(long)]
    demo: bool,
    /// Tour catalog file (.json, .yaml or .yml) replacing the built-in steps
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum TourAction {
    /// Print the tour flags as JSON
    Status,
    /// Clear the tour flags so the next visit counts as the first
    Reset,
    /// List the steps of the catalog
    Steps {
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Run(RunArgs::default()));
    init_tracing(matches!(command, Command::Run(_)));

    match command {
        Command::Run(args) => {
            let catalog = load_catalog(args.catalog.as_deref())?;
            let tour = TourContext::with_system_clock(catalog, open_store(cli.store_path), TourConfig::terminal());
            learnova_tui::run(tour, RunOptions { demo: args.demo }).await
        }
        Command::Tour(action) => run_tour_action(action, cli.store_path),
    }
}

/// While the dashboard owns the terminal, logs go to a file (or nowhere when
/// the file cannot be opened); other commands log to stderr.
fn init_tracing(to_file: bool) {
    let default_level = if to_file { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let writer = if to_file {
        match open_log_file(&default_log_path()) {
            Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
            Err(_) => BoxMakeWriter::new(io::sink),
        }
    } else {
        BoxMakeWriter::new(io::stderr)
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!to_file)
        .with_writer(writer)
        .try_init();
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::options().create(true).append(true).open(path)
}

/// Open the JSON store. Failure is not fatal: the tour runs without persistence.
fn open_store(path: Option<PathBuf>) -> Option<Arc<dyn DurableStore>> {
    match JsonFileStore::new(path) {
        Ok(store) => {
            info!(path = %store.path().display(), "opened tour state store");
            Some(Arc::new(store) as Arc<dyn DurableStore>)
        }
        Err(error) => {
            warn!(error = %error, "tour state store unavailable; continuing without persistence");
            None
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<TourCatalog> {
    match path {
        Some(path) => {
            TourCatalog::from_path(path).with_context(|| format!("failed to load tour catalog from {}", path.display()))
        }
        None => Ok(TourCatalog::coordinator()),
    }
}

fn run_tour_action(action: TourAction, store_path: Option<PathBuf>) -> Result<()> {
    match action {
        TourAction::Status => {
            let mut tour = TourContext::with_system_clock(TourCatalog::coordinator(), open_store(store_path), TourConfig::terminal());
            tour.load();
            println!("{}", serde_json::to_string_pretty(&tour.status())?);
        }
        TourAction::Reset => {
            let store = open_store(store_path).context("tour state store is unavailable")?;
            let mut tour = TourContext::with_system_clock(TourCatalog::coordinator(), Some(store), TourConfig::terminal());
            tour.reset_tour();
            if tour.status().storage_degraded {
                anyhow::bail!("failed to clear the stored tour flags");
            }
            println!("Tour flags cleared; the tour will start on the next visit.");
        }
        TourAction::Steps { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            for (index, step) in catalog.steps().iter().enumerate() {
                println!("{:>2}  {:<18} {:<7} {}", index + 1, step.id, step.position.to_string(), step.target);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_store_path_after_subcommands() {
        let cli = Cli::parse_from(["learnova", "tour", "status", "--store-path", "/tmp/state.json"]);
        assert_eq!(cli.store_path, Some(PathBuf::from("/tmp/state.json")));
        assert!(matches!(cli.command, Some(Command::Tour(TourAction::Status))));

        let cli = Cli::parse_from(["learnova", "run", "--demo"]);
        assert!(matches!(cli.command, Some(Command::Run(RunArgs { demo: true, catalog: None }))));
    }

    #[test]
    fn log_file_is_created_with_its_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("learnova.log");
        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn log_file_under_a_regular_file_reports_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        assert!(open_log_file(&blocker.join("learnova.log")).is_err());
    }

    #[test]
    fn status_does_not_record_a_visit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        run_tour_action(TourAction::Status, Some(path.clone())).unwrap();
        let mut tour = TourContext::with_system_clock(TourCatalog::coordinator(), open_store(Some(path)), TourConfig::terminal());
        assert!(tour.initialize().auto_start);
    }

    #[test]
    fn reset_clears_a_completed_tour() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut tour = TourContext::with_system_clock(TourCatalog::coordinator(), open_store(Some(path.clone())), TourConfig::terminal());
        tour.initialize();
        tour.start_tour(false);
        tour.close();
        assert!(tour.has_completed_tour());

        run_tour_action(TourAction::Reset, Some(path.clone())).unwrap();
        let mut tour = TourContext::with_system_clock(TourCatalog::coordinator(), open_store(Some(path)), TourConfig::terminal());
        assert!(tour.initialize().auto_start);
        assert!(!tour.has_completed_tour());
    }
}
