//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Memo, per-service adapters and the resolver registry.
pub mod resolver;
/// Hosting service clients.
pub mod services;
/// Record store adapters.
pub mod store;

pub use config::{AppConfig, CliArgs, ConfigLoader, LogLevel, SizeArg};
pub use resolver::{MemoCache, ResolverRegistry, ServiceAdapter};
pub use services::{ServiceKind, build_registry};
pub use store::{DiskRecordStore, MemoryRecordStore};
