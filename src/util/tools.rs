//! Interpreter availability detection
//!
//! Resolves the base Python interpreter used to create the isolated
//! environment, either from an explicitly configured path or by searching
//! `PATH` for the configured candidate names.

use std::path::{Path, PathBuf};

/// Default interpreter names searched on `PATH`, in order
pub const DEFAULT_CANDIDATES: &[&str] = &["python3", "python"];

/// Outcome of an interpreter lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterStatus {
    /// Interpreter is available at the given path
    Available(PathBuf),
    /// None of the candidate names was found on `PATH`
    NotFound { candidates: Vec<String> },
    /// A path was configured but it is missing or not executable
    ConfiguredPathInvalid(PathBuf),
}

/// Detect the base interpreter.
///
/// 1. If a path is configured, validate that it exists and is executable
/// 2. Otherwise search `PATH` for each candidate in order
pub fn detect_interpreter(configured: Option<&Path>, candidates: &[String]) -> InterpreterStatus {
    if let Some(path) = configured {
        return if is_valid_executable(path) {
            InterpreterStatus::Available(path.to_path_buf())
        } else {
            InterpreterStatus::ConfiguredPathInvalid(path.to_path_buf())
        };
    }

    for name in candidates {
        match which::which(name) {
            Ok(path) => {
                tracing::debug!(candidate = %name, path = %path.display(), "Found interpreter");
                return InterpreterStatus::Available(path);
            }
            Err(e) => {
                tracing::debug!(candidate = %name, error = %e, "Interpreter candidate not found");
            }
        }
    }

    InterpreterStatus::NotFound {
        candidates: candidates.to_vec(),
    }
}

/// Check if a path points to a valid executable
pub fn is_valid_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = path.metadata() {
            return metadata.permissions().mode() & 0o111 != 0;
        }
        false
    }

    #[cfg(not(unix))]
    {
        true
    }
}
