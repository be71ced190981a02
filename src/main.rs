mod model;
mod setup;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueHint};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use model::config::AppConfig;
use model::env::Env;
use model::paths::{self, KrewPaths};

#[derive(Parser)]
#[command(
    name = "krew-setup",
    version,
    about = "Check that the krew bin directory is on PATH and explain how to add it"
)]
struct Cli {
    #[arg(
        long,
        help = "Installation root (default: $KREW_ROOT, then general.root from config)",
        value_hint = ValueHint::DirPath
    )]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy, Debug, Default)]
enum Command {
    /// Print setup instructions to stderr if the bin directory needs adding.
    #[default]
    Advise,
    /// Report whether the bin directory is usable; exits 1 if not.
    Check,
    /// Print setup instructions regardless of the current PATH.
    Instructions,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let _guard = init_logging(&config);

    let resolved = paths::resolve_root(cli.root.as_deref(), &config.general.root)?;
    tracing::info!(
        "krew root {} (from {:?})",
        resolved.paths.base_path().display(),
        resolved.source
    );

    let env = Env::from_process();
    if run(cli.command.unwrap_or_default(), &resolved.paths, &env) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Returns false only for `check` when the bin directory is not usable.
fn run(command: Command, paths: &KrewPaths, env: &Env) -> bool {
    match command {
        Command::Advise => {
            if !setup::is_bin_dir_usable(paths, env) {
                eprintln!("{}", setup::compose_instructions(paths, env));
            }
            true
        }
        Command::Check => {
            let usable = setup::is_bin_dir_usable(paths, env);
            println!("{}", if usable { "usable" } else { "not usable" });
            usable
        }
        Command::Instructions => {
            println!("{}", setup::compose_instructions(paths, env));
            true
        }
    }
}

/// Log to a daily file in the data directory, never stdout.
///
/// Returns `None` (logging disabled) if the directory cannot be created;
/// advice output must not depend on logging working.
fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let log_dir = directories::ProjectDirs::from("", "", "krew-setup")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("krew-setup"));
    if let Err(err) = std::fs::create_dir_all(&log_dir) {
        eprintln!("krew-setup: logging disabled, cannot create {}: {err}", log_dir.display());
        return None;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    let file_appender = tracing_appender::rolling::daily(&log_dir, "krew-setup.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::debug!("logging to {}", log_dir.display());
    Some(guard)
}
