use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use launcher::bootstrap::{self, Bootstrapper};
use launcher::{BootstrapError, Config};

/// Bootstrap an isolated Python environment and launch the bot inside it
#[derive(Parser, Debug)]
#[command(name = "launcher", version)]
struct Cli {
    /// Directory holding the manifest and entry point (default: the launcher's own directory)
    #[arg(long, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Virtual environment directory, relative to the project directory
    #[arg(long, value_name = "DIR")]
    env_dir: Option<PathBuf>,

    /// Dependency manifest installed on every launch
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Program run inside the environment
    #[arg(long, value_name = "FILE")]
    entry: Option<PathBuf>,

    /// Base interpreter used instead of searching PATH
    #[arg(long, value_name = "PATH")]
    interpreter: Option<PathBuf>,

    /// Replace the launcher process with the entry point (Unix only)
    #[arg(long)]
    exec: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Arguments forwarded to the entry point
    #[arg(last = true, value_name = "ENTRY_ARGS")]
    entry_args: Vec<String>,
}

impl Cli {
    /// Layer command-line flags on top of the loaded config
    fn apply(self, mut config: Config) -> Config {
        if let Some(dir) = self.env_dir {
            config = config.with_env_dir(dir);
        }
        if let Some(manifest) = self.manifest {
            config = config.with_manifest(manifest);
        }
        if let Some(entry) = self.entry {
            config = config.with_entry(entry);
        }
        if let Some(interpreter) = self.interpreter {
            config = config.with_interpreter_path(interpreter);
        }
        if self.exec {
            config = config.with_exec(true);
        }
        if !self.entry_args.is_empty() {
            config = config.with_entry_args(self.entry_args);
        }
        config
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Logs go to stderr so stdout carries only progress lines
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}

fn run(mut cli: Cli) -> Result<i32, BootstrapError> {
    // Flag paths are relative to where the user ran us, not the project
    if let Some(interpreter) = cli.interpreter.take() {
        let interpreter = match std::env::current_dir() {
            Ok(cwd) => launcher::util::resolve(&cwd, &interpreter),
            Err(_) => interpreter,
        };
        cli.interpreter = Some(interpreter);
    }

    let project_dir = bootstrap::enter_project_dir(cli.project_dir.take())?;
    let config = cli.apply(Config::load(&project_dir)?);
    tracing::debug!(?config, "Resolved configuration");

    Bootstrapper::new(project_dir, config).run()
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: {e}");
    }

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "Bootstrap failed");
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    std::process::exit(code);
}
