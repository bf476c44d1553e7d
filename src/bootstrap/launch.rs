//! Entry-point launch

use std::path::Path;

use crate::util::paths::EnvLayout;

use super::environment::Activation;
use super::error::{exit_code_of, BootstrapError};

/// Run the entry point with the environment's interpreter.
///
/// Standard streams are inherited. Returns the exit code the launcher
/// should exit with, which is the entry point's own status. With `exec`
/// on Unix the launcher process is replaced and this only returns on
/// failure.
pub fn launch_entry(
    activation: &Activation,
    layout: &EnvLayout,
    entry: &Path,
    args: &[String],
    exec: bool,
) -> Result<i32, BootstrapError> {
    let python = layout.python();
    let mut cmd = activation.command(&python);
    cmd.arg(entry).args(args);

    if exec {
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            tracing::debug!(entry = %entry.display(), "Replacing launcher process");
            let source = cmd.exec();
            return Err(BootstrapError::Spawn {
                program: python,
                source,
            });
        }

        #[cfg(not(unix))]
        tracing::warn!("Process replacement is unsupported on this platform, waiting instead");
    }

    let status = cmd.status().map_err(|source| BootstrapError::Spawn {
        program: python.clone(),
        source,
    })?;

    let code = exit_code_of(status);
    tracing::info!(entry = %entry.display(), code, "Entry point exited");
    Ok(code)
}
