//! Isolated environment creation and activation

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use crate::util::paths::EnvLayout;

use super::error::BootstrapError;

/// What `ensure_environment` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvState {
    /// The environment directory was absent and has been created
    Created,
    /// An existing environment directory was reused untouched
    Reused,
}

/// Ensure the isolated environment exists, creating it with
/// `<interpreter> -m venv <dir>` only when the directory is absent.
///
/// An existing directory is never recreated or modified.
pub fn ensure_environment(
    interpreter: &Path,
    layout: &EnvLayout,
) -> Result<EnvState, BootstrapError> {
    let state = if layout.exists() {
        tracing::debug!(env = %layout.root().display(), "Reusing existing environment");
        EnvState::Reused
    } else {
        tracing::info!(
            env = %layout.root().display(),
            interpreter = %interpreter.display(),
            "Creating environment"
        );
        let status = Command::new(interpreter)
            .arg("-m")
            .arg("venv")
            .arg(layout.root())
            .status()
            .map_err(|source| BootstrapError::Spawn {
                program: interpreter.to_path_buf(),
                source,
            })?;

        if !status.success() {
            return Err(BootstrapError::EnvironmentCreation { status });
        }
        EnvState::Created
    };

    if !layout.has_python() {
        return Err(BootstrapError::BrokenEnvironment(layout.root().to_path_buf()));
    }

    Ok(state)
}

/// Execution context that makes the isolated environment take precedence
/// over any system-wide installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    virtual_env: OsString,
    path: OsString,
}

impl Activation {
    /// Activate against the current process's `PATH`
    pub fn new(layout: &EnvLayout) -> Result<Self, BootstrapError> {
        Self::with_search_path(layout, std::env::var_os("PATH"))
    }

    /// Activate against an explicit `PATH` value
    pub fn with_search_path(
        layout: &EnvLayout,
        current: Option<OsString>,
    ) -> Result<Self, BootstrapError> {
        let mut dirs = vec![layout.bin_dir()];
        if let Some(current) = current.as_deref() {
            dirs.extend(std::env::split_paths(current));
        }

        Ok(Self {
            virtual_env: layout.root().as_os_str().to_os_string(),
            path: std::env::join_paths(dirs)?,
        })
    }

    /// Value `VIRTUAL_ENV` takes inside the environment
    pub fn virtual_env(&self) -> &OsStr {
        &self.virtual_env
    }

    /// Value `PATH` takes inside the environment
    pub fn search_path(&self) -> &OsStr {
        &self.path
    }

    /// Apply the activation to a command about to be spawned
    pub fn apply<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.env("VIRTUAL_ENV", &self.virtual_env)
            .env("PATH", &self.path)
            .env_remove("PYTHONHOME")
    }

    /// Build an activated command for `program`
    pub fn command(&self, program: impl AsRef<OsStr>) -> Command {
        let mut cmd = Command::new(program);
        self.apply(&mut cmd);
        cmd
    }
}
