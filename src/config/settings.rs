use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::util::paths::{config_path, DEFAULT_ENTRY, DEFAULT_ENV_DIR, DEFAULT_MANIFEST};
use crate::util::tools::DEFAULT_CANDIDATES;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("launcher.toml.example");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Launcher configuration
///
/// Relative paths are interpreted against the project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interpreter names searched on `PATH`, in order
    pub interpreter_candidates: Vec<String>,
    /// Explicit base interpreter (skips the `PATH` search)
    pub interpreter_path: Option<PathBuf>,
    /// Isolated environment directory
    pub env_dir: PathBuf,
    /// Dependency manifest
    pub manifest: PathBuf,
    /// Extra arguments for `pip install`
    pub pip_args: Vec<String>,
    /// Entry-point program
    pub entry: PathBuf,
    /// Arguments forwarded to the entry point
    pub entry_args: Vec<String>,
    /// Replace the launcher process with the entry point
    pub exec: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interpreter_candidates: DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            interpreter_path: None,
            env_dir: PathBuf::from(DEFAULT_ENV_DIR),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            pip_args: Vec::new(),
            entry: PathBuf::from(DEFAULT_ENTRY),
            entry_args: Vec::new(),
            exec: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    interpreter: Option<TomlInterpreterConfig>,
    environment: Option<TomlEnvironmentConfig>,
    dependencies: Option<TomlDependenciesConfig>,
    entry: Option<TomlEntryConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlInterpreterConfig {
    candidates: Option<Vec<String>>,
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlEnvironmentConfig {
    dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlDependenciesConfig {
    manifest: Option<PathBuf>,
    pip_args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlEntryConfig {
    program: Option<PathBuf>,
    args: Option<Vec<String>>,
    exec: Option<bool>,
}

impl Config {
    /// Load configuration for a project directory, merging with defaults.
    ///
    /// A missing `launcher.toml` yields the defaults; an unreadable or
    /// malformed one is an error.
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_path(project_dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&contents)
            .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parse configuration from TOML text, merging with defaults
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(interpreter) = toml_config.interpreter {
            if let Some(candidates) = interpreter.candidates {
                config.interpreter_candidates = candidates;
            }
            config.interpreter_path = interpreter.path;
        }

        if let Some(dir) = toml_config.environment.and_then(|env| env.dir) {
            config.env_dir = dir;
        }

        if let Some(deps) = toml_config.dependencies {
            if let Some(manifest) = deps.manifest {
                config.manifest = manifest;
            }
            if let Some(pip_args) = deps.pip_args {
                config.pip_args = pip_args;
            }
        }

        if let Some(entry) = toml_config.entry {
            if let Some(program) = entry.program {
                config.entry = program;
            }
            if let Some(args) = entry.args {
                config.entry_args = args;
            }
            if let Some(exec) = entry.exec {
                config.exec = exec;
            }
        }

        Ok(config)
    }

    pub fn with_interpreter_path(mut self, path: PathBuf) -> Self {
        self.interpreter_path = Some(path);
        self
    }

    pub fn with_env_dir(mut self, dir: PathBuf) -> Self {
        self.env_dir = dir;
        self
    }

    pub fn with_manifest(mut self, manifest: PathBuf) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_entry(mut self, entry: PathBuf) -> Self {
        self.entry = entry;
        self
    }

    /// Replace the configured entry arguments
    pub fn with_entry_args(mut self, args: Vec<String>) -> Self {
        self.entry_args = args;
        self
    }

    pub fn with_exec(mut self, exec: bool) -> Self {
        self.exec = exec;
        self
    }
}
