//! Manifest-driven dependency installation

use std::path::Path;

use crate::util::paths::EnvLayout;

use super::environment::Activation;
use super::error::BootstrapError;

/// What `install_dependencies` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// pip ran against the manifest
    Installed { requirements: usize },
    /// The manifest file does not exist
    MissingManifest,
}

/// Extract requirement lines from manifest text.
///
/// Blank lines and `#` comments (whole-line or trailing, pip style) are
/// dropped.
pub fn parse_requirements(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(strip_comment)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    match line.find(" #").or_else(|| line.find("\t#")) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Install every requirement in `manifest` into the active environment.
///
/// Runs on every launch; pip treats already-satisfied requirements as a
/// no-op. The manifest file itself is handed to `pip install -r`, so any
/// pip options it contains keep working.
pub fn install_dependencies(
    activation: &Activation,
    layout: &EnvLayout,
    manifest: &Path,
    pip_args: &[String],
) -> Result<InstallOutcome, BootstrapError> {
    let contents = match std::fs::read_to_string(manifest) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(manifest = %manifest.display(), "Manifest not found, skipping installation");
            return Ok(InstallOutcome::MissingManifest);
        }
        Err(source) => {
            return Err(BootstrapError::Manifest {
                path: manifest.to_path_buf(),
                source,
            })
        }
    };

    let requirements = parse_requirements(&contents);

    let python = layout.python();
    tracing::info!(
        manifest = %manifest.display(),
        requirements = requirements.len(),
        "Installing dependencies"
    );

    let status = activation
        .command(&python)
        .args(["-m", "pip", "install"])
        .args(pip_args)
        .arg("-r")
        .arg(manifest)
        .status()
        .map_err(|source| BootstrapError::Spawn {
            program: python.clone(),
            source,
        })?;

    if !status.success() {
        return Err(BootstrapError::Installation { status });
    }

    Ok(InstallOutcome::Installed {
        requirements: requirements.len(),
    })
}
