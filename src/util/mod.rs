//! Utility modules

pub mod paths;
pub mod tools;

pub use paths::{config_path, launcher_dir, resolve, EnvLayout};
pub use tools::{detect_interpreter, is_valid_executable, InterpreterStatus};
