//! Project and interpreter fixtures
//!
//! The fake interpreter records every invocation in `calls.log` inside the
//! project directory (the launcher runs everything from there) and reacts
//! to control files:
//!
//! - `fail_venv` / `fail_pip`: exit with the status written in the file
//! - `exit_code`: status the "entry point" exits with

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

const FAKE_PYTHON: &str = r#"#!/bin/sh
PATH=/usr/bin:/bin
if [ "$1" = "-m" ] && [ "$2" = "venv" ]; then
    echo "venv $3" >> calls.log
    if [ -f fail_venv ]; then exit "$(cat fail_venv)"; fi
    mkdir -p "$3/bin" || exit 1
    cp "$0" "$3/bin/python" || exit 1
    exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "pip" ]; then
    shift 2
    echo "pip $*" >> calls.log
    if [ -f fail_pip ]; then exit "$(cat fail_pip)"; fi
    req=""
    while [ $# -gt 0 ]; do
        if [ "$1" = "-r" ]; then req="$2"; shift; fi
        shift
    done
    mkdir -p "$VIRTUAL_ENV/site-packages"
    grep -v '^#' "$req" | while read -r pkg; do
        if [ -n "$pkg" ]; then touch "$VIRTUAL_ENV/site-packages/$pkg"; fi
    done
    exit 0
fi
echo "run $* VIRTUAL_ENV=$VIRTUAL_ENV" >> calls.log
if [ -f exit_code ]; then exit "$(cat exit_code)"; fi
exit 0
"#;

/// A scratch project directory plus a `PATH` directory holding a fake
/// `python3`.
///
/// Both are removed when the `TestProject` is dropped.
pub struct TestProject {
    _dir: TempDir,
    /// Project directory (manifest, entry point, environment)
    pub path: PathBuf,
    /// Directory containing only the fake `python3`
    pub bin_dir: PathBuf,
    /// Directory with no executables at all
    pub empty_dir: PathBuf,
}

impl TestProject {
    /// Create a project with a two-package manifest and a `bot.py`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("project");
        let bin_dir = dir.path().join("fakebin");
        let empty_dir = dir.path().join("empty");
        for d in [&path, &bin_dir, &empty_dir] {
            std::fs::create_dir_all(d).unwrap();
        }

        let python = bin_dir.join("python3");
        std::fs::write(&python, FAKE_PYTHON).unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();

        std::fs::write(path.join("requirements.txt"), "# deps\nalpha\nbeta\n").unwrap();
        std::fs::write(path.join("bot.py"), "print('hello')\n").unwrap();

        Self {
            _dir: dir,
            path,
            bin_dir,
            empty_dir,
        }
    }

    /// Path of the fake base interpreter
    pub fn fake_python(&self) -> PathBuf {
        self.bin_dir.join("python3")
    }

    /// Default environment directory
    pub fn venv(&self) -> PathBuf {
        self.path.join("venv")
    }

    /// Write a file inside the project
    pub fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.path.join(name), contents).unwrap();
    }

    /// Recorded interpreter invocations, one per line
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path.join("calls.log"))
            .map(|s| s.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Recorded invocations starting with `kind` (`venv`, `pip` or `run`)
    pub fn calls_of(&self, kind: &str) -> Vec<String> {
        let prefix = format!("{kind} ");
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(&prefix))
            .collect()
    }

    /// Launcher command pointed at this project, with the fake interpreter
    /// as the only thing on `PATH`, run from an unrelated directory
    pub fn launcher(&self) -> Command {
        let mut cmd = Command::cargo_bin("launcher").expect("launcher binary");
        cmd.env("PATH", &self.bin_dir)
            .env_remove("RUST_LOG")
            .current_dir(&self.empty_dir)
            .arg("--project-dir")
            .arg(&self.path);
        cmd
    }

    /// Launcher command with nothing resolvable on `PATH`
    pub fn launcher_without_python(&self) -> Command {
        let mut cmd = self.launcher();
        cmd.env("PATH", &self.empty_dir);
        cmd
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `path` exists as a regular file with any execute bit set
pub fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
