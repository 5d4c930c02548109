pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::process::ProcessRunner;
pub use config::{toml_config::TomlConfig, SmokeConfig};
pub use core::{engine::SmokeEngine, pipeline::HarnessPipeline};
pub use utils::error::{Result, SmokeError};
