//! Path utilities for the project directory and environment layout

use std::path::{Path, PathBuf};

/// Default name of the isolated environment directory
pub const DEFAULT_ENV_DIR: &str = "venv";

/// Default dependency manifest file name
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Default entry-point program
pub const DEFAULT_ENTRY: &str = "bot.py";

/// Name of the optional per-project config file
pub const CONFIG_FILE_NAME: &str = "launcher.toml";

/// Get the directory containing the running launcher executable.
///
/// Symlinks are resolved so a launcher linked into `~/bin` still finds
/// the project it was built for.
pub fn launcher_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("executable has no parent directory: {}", exe.display()),
        )
    })
}

/// Get the config file path inside a project directory
pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_FILE_NAME)
}

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Filesystem layout of an isolated environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLayout {
    root: PathBuf,
}

impl EnvLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The environment directory itself
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the environment's executables (`bin` or `Scripts`)
    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    /// Path of the environment's interpreter
    pub fn python(&self) -> PathBuf {
        if cfg!(windows) {
            self.bin_dir().join("python.exe")
        } else {
            self.bin_dir().join("python")
        }
    }

    /// Whether the environment directory is present
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Whether the environment's interpreter is present
    pub fn has_python(&self) -> bool {
        self.python().is_file()
    }
}
