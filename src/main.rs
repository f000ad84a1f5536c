mod telemetry;
mod web;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::telemetry::{NormalizeReport, SeriesStore};
use crate::web::{AppState, Config};

#[derive(Parser)]
#[command(name = "flight-log-viewer")]
#[command(about = "Replay recorded aircraft telemetry logs over HTTP")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Resolve relative paths against the current directory instead of the
    /// executable's directory
    #[arg(long, global = true)]
    keep_cwd: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the log and serve the API and front-end (default)
    Serve,
    /// Load a log file and print what was reconstructed from it
    Validate { file: Option<PathBuf> },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let paths = match Paths::from_cli(&cli) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Invalid path argument: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !cli.keep_cwd {
        if let Err(e) = enter_executable_dir() {
            log::warn!("Failed to change to executable directory: {}", e);
        }
    }

    let config = match paths.config {
        Some(path) => match Config::from_file(&path.to_string_lossy()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    match cli.command {
        None | Some(Commands::Serve) => serve(config).await,
        Some(Commands::Validate { .. }) => {
            validate(paths.log.as_deref().unwrap_or(&config.data.file))
        }
    }
}

/// Paths given on the command line, resolved against the directory the user
/// ran the command from. Must be built before the working directory changes.
#[derive(Debug, PartialEq)]
struct Paths {
    config: Option<PathBuf>,
    log: Option<PathBuf>,
}

impl Paths {
    fn from_cli(cli: &Cli) -> std::io::Result<Self> {
        let log = match &cli.command {
            Some(Commands::Validate { file }) => file.as_deref(),
            _ => None,
        };

        Ok(Paths {
            config: cli.config.as_deref().map(std::path::absolute).transpose()?,
            log: log.map(std::path::absolute).transpose()?,
        })
    }
}

fn enter_executable_dir() -> std::io::Result<()> {
    let exe = std::env::current_exe()?;
    if let Some(dir) = exe.parent() {
        std::env::set_current_dir(dir)?;
        log::debug!("Working directory set to {}", dir.display());
    }
    Ok(())
}

async fn serve(config: Config) -> ExitCode {
    let store = load_store(&config.data.file);
    let state = AppState::new(store);

    match web::run_server(config, state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// A log that cannot be loaded leaves the server running with no data.
fn load_store(path: &Path) -> SeriesStore {
    log::info!("Loading data from {}", path.display());

    match telemetry::load(path) {
        Ok(normalized) => {
            log_report(&normalized.report);
            if normalized.store.is_empty() {
                log::warn!("No telemetry samples found in {}", path.display());
            } else {
                log::info!(
                    "Data loaded. Found {} unique IDs, {} samples",
                    normalized.store.entity_count(),
                    normalized.store.sample_count()
                );
            }
            normalized.store
        }
        Err(e) => {
            log::error!("{}", e);
            SeriesStore::default()
        }
    }
}

fn log_report(report: &NormalizeReport) {
    log::info!(
        "{} entries: {} samples, {} discarded, {} ignored, {} records without id",
        report.entries,
        report.samples,
        report.discarded(),
        report.ignored,
        report.records_without_id
    );
    if report.non_iso_timestamps > 0 {
        log::warn!(
            "{} timestamps are not ISO-8601; series are ordered by raw string and may not be chronological",
            report.non_iso_timestamps
        );
    }
}

fn validate(path: &Path) -> ExitCode {
    let normalized = match telemetry::load(path) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error loading {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let report = &normalized.report;
    println!(
        "Log is valid ({} entries, {} samples)",
        report.entries, report.samples
    );
    println!("  discarded: {}", report.discarded());
    println!("    not an object: {}", report.not_objects);
    println!("    missing timestamp: {}", report.missing_timestamp);
    println!("    missing data: {}", report.missing_data);
    println!("  ignored: {}", report.ignored);
    println!("  records without id: {}", report.records_without_id);
    println!("  non-ISO timestamps: {}", report.non_iso_timestamps);

    for (id, samples) in normalized.store.iter() {
        let span = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => format!("{} .. {}", first.timestamp, last.timestamp),
            _ => "empty".to_string(),
        };
        println!("  {}: {} samples @ {}", id, samples.len(), span);
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn validate_log_is_resolved_against_invocation_dir() {
        let cwd = std::env::current_dir().unwrap();
        let paths = Paths::from_cli(&parse(&["flight-log-viewer", "validate", "log.json"])).unwrap();

        assert_eq!(paths.log, Some(cwd.join("log.json")));
        assert_eq!(paths.config, None);
    }

    #[test]
    fn config_is_resolved_against_invocation_dir() {
        let cwd = std::env::current_dir().unwrap();
        let paths =
            Paths::from_cli(&parse(&["flight-log-viewer", "--config", "conf/viewer.yaml"])).unwrap();

        assert_eq!(paths.config, Some(cwd.join("conf/viewer.yaml")));
        assert_eq!(paths.log, None);
    }

    #[test]
    fn absolute_paths_are_kept() {
        let paths = Paths::from_cli(&parse(&[
            "flight-log-viewer",
            "validate",
            "/data/flight.json",
            "--config",
            "/etc/viewer.yaml",
        ]))
        .unwrap();

        assert_eq!(
            paths,
            Paths {
                config: Some(PathBuf::from("/etc/viewer.yaml")),
                log: Some(PathBuf::from("/data/flight.json")),
            }
        );
    }

    #[test]
    fn validate_without_file_uses_configured_log() {
        let paths = Paths::from_cli(&parse(&["flight-log-viewer", "validate"])).unwrap();
        assert_eq!(paths.log, None);
    }
}
