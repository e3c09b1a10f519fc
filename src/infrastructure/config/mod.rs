//! Application configuration.

pub mod app_config;
pub mod args;
pub mod loader;

pub use app_config::{
    AppConfig, DEFAULT_MAX_CONCURRENT_LOOKUPS, EndpointsConfig, HttpConfig, LogLevel, MemoConfig,
    StoreConfig,
};
pub use args::{CliArgs, SizeArg};
pub use loader::{ConfigError, ConfigLoader};
