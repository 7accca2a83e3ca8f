//! Configuration system for Scrapper.
//!
//! Player tuning, audio pools, input and simulation settings that persist to
//! disk as RON files. Supports CLI overrides via clap, hot-reload detection,
//! forward/backward compatible serialization, and up-front validation of
//! values the player controller cannot run with.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{AudioConfig, Config, DebugConfig, InputConfig, PlayerTuning, SimConfig};
pub use error::ConfigError;
