//! CLI command implementations

pub mod extract;
pub mod init;
pub mod recommend;
pub mod repl;

use anyhow::Result;
use std::path::Path;

use neuralflow::config::Config;

/// Load the explicit config file if given, else look it up from `work_dir`
pub fn load_config(work_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::from_file(path),
        None => Config::from_dir(work_dir),
    }
}
