//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config struct, server identity and loading
//! - [`listen`]: Network listener configuration
//! - [`limits`]: Frame and queue limits
//! - [`validation`]: Startup range checks

mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::{Config, ConfigError, DEFAULT_CONFIG_PATH, PreRegistration, ServerConfig};
pub use validation::{ValidationError, validate};
