//! Environment bootstrapper
//!
//! A linear, fail-fast pipeline: enter the project directory, find a base
//! interpreter, ensure the isolated environment exists, activate it,
//! install the manifest, then launch the entry point inside it.

mod environment;
mod error;
mod install;
mod launch;

pub use environment::{ensure_environment, Activation, EnvState};
pub use error::{exit_code_of, BootstrapError, FAILURE_EXIT_CODE};
pub use install::{install_dependencies, parse_requirements, InstallOutcome};
pub use launch::launch_entry;

use std::path::PathBuf;

use crate::config::Config;
use crate::util::paths::{launcher_dir, resolve, EnvLayout};
use crate::util::tools::{detect_interpreter, InterpreterStatus};

/// Change into the project directory so relative paths resolve against it.
///
/// Without an explicit directory, the launcher executable's own directory
/// is used. Returns the absolute project directory.
pub fn enter_project_dir(dir: Option<PathBuf>) -> Result<PathBuf, BootstrapError> {
    let dir = match dir {
        Some(dir) => dir,
        None => launcher_dir().map_err(|source| BootstrapError::ProjectDir {
            path: PathBuf::from("."),
            source,
        })?,
    };

    let dir = dir
        .canonicalize()
        .map_err(|source| BootstrapError::ProjectDir {
            path: dir.clone(),
            source,
        })?;
    std::env::set_current_dir(&dir).map_err(|source| BootstrapError::ProjectDir {
        path: dir.clone(),
        source,
    })?;

    tracing::debug!(project_dir = %dir.display(), "Entered project directory");
    Ok(dir)
}

/// Runs the bootstrap pipeline for one project directory
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    project_dir: PathBuf,
    config: Config,
}

impl Bootstrapper {
    pub fn new(project_dir: PathBuf, config: Config) -> Self {
        Self {
            project_dir,
            config,
        }
    }

    /// Layout of the environment this bootstrapper manages
    pub fn layout(&self) -> EnvLayout {
        EnvLayout::new(resolve(&self.project_dir, &self.config.env_dir))
    }

    /// Check that a base interpreter is available.
    ///
    /// A relative configured path resolves against the project directory.
    pub fn check_interpreter(&self) -> Result<PathBuf, BootstrapError> {
        let configured = self
            .config
            .interpreter_path
            .as_deref()
            .map(|path| resolve(&self.project_dir, path));
        match detect_interpreter(configured.as_deref(), &self.config.interpreter_candidates) {
            InterpreterStatus::Available(path) => Ok(path),
            InterpreterStatus::NotFound { candidates } => {
                Err(BootstrapError::InterpreterNotFound { candidates })
            }
            InterpreterStatus::ConfiguredPathInvalid(path) => {
                Err(BootstrapError::InterpreterInvalid(path))
            }
        }
    }

    /// Run every stage in order and return the entry point's exit code
    pub fn run(&self) -> Result<i32, BootstrapError> {
        println!("Checking for Python interpreter...");
        let interpreter = self.check_interpreter()?;
        println!("Using interpreter: {}", interpreter.display());

        let layout = self.layout();
        println!("Checking virtual environment: {}", layout.root().display());
        match ensure_environment(&interpreter, &layout)? {
            EnvState::Created => println!("Created virtual environment"),
            EnvState::Reused => println!("Using existing virtual environment"),
        }

        println!("Activating virtual environment...");
        let activation = Activation::new(&layout)?;

        let manifest = resolve(&self.project_dir, &self.config.manifest);
        println!("Installing dependencies from {}...", manifest.display());
        match install_dependencies(&activation, &layout, &manifest, &self.config.pip_args)? {
            InstallOutcome::Installed { requirements } => {
                println!("Dependencies up to date ({requirements} listed)");
            }
            InstallOutcome::MissingManifest => {
                println!("No {} found, nothing to install", manifest.display());
            }
        }

        let entry = resolve(&self.project_dir, &self.config.entry);
        println!("Starting {}...", entry.display());
        launch_entry(
            &activation,
            &layout,
            &entry,
            &self.config.entry_args,
            self.config.exec,
        )
    }
}
