//! URL resolution infrastructure.
//!
//! This module provides:
//! - A bounded memo cache per service
//! - Service adapters layering memo, record store and remote lookup
//! - The ordered resolver registry

pub mod memo_cache;
pub mod registry;
pub mod service_adapter;

pub use memo_cache::{DEFAULT_MEMO_CAPACITY, MemoCache, MemoStats};
pub use registry::{RegistryError, ResolverRegistry};
pub use service_adapter::ServiceAdapter;
