pub mod bootstrap;
pub mod config;
pub mod util;

pub use bootstrap::{BootstrapError, Bootstrapper};
pub use config::Config;
