//! Bootstrap error types and exit-code mapping

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::config::ConfigError;

/// Exit code for launcher-side failures (missing interpreter, I/O, config)
pub const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Python interpreter not found on PATH (tried: {})", .candidates.join(", "))]
    InterpreterNotFound { candidates: Vec<String> },
    #[error("Configured interpreter is missing or not executable: {0}")]
    InterpreterInvalid(PathBuf),
    #[error("Cannot enter project directory {path}: {source}")]
    ProjectDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create virtual environment ({status})")]
    EnvironmentCreation { status: ExitStatus },
    #[error("Virtual environment at {0} has no interpreter; remove the directory to recreate it")]
    BrokenEnvironment(PathBuf),
    #[error("Cannot build PATH for the virtual environment: {0}")]
    Activation(#[from] std::env::JoinPathsError),
    #[error("Failed to read manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Dependency installation failed ({status})")]
    Installation { status: ExitStatus },
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BootstrapError {
    /// Process exit code for this error.
    ///
    /// Tool failures propagate the tool's own status; everything detected
    /// by the launcher itself exits with `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::EnvironmentCreation { status }
            | BootstrapError::Installation { status } => exit_code_of(*status),
            _ => FAILURE_EXIT_CODE,
        }
    }
}

/// Convert a child's exit status into the code the launcher exits with.
///
/// On Unix a child killed by a signal maps to `128 + signal`, matching
/// what a shell reports.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    FAILURE_EXIT_CODE
}
