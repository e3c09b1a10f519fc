//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::infrastructure::resolver::DEFAULT_MEMO_CAPACITY;
use crate::infrastructure::services::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ServiceKind};

pub(crate) const APP_NAME: &str = "picfetch";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";

/// Default number of URLs resolved at once.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 4;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level.
    #[default]
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, from `config.toml` and CLI overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path. Logs go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Services to register, in dispatch order.
    #[serde(default = "default_services")]
    pub services: Vec<ServiceKind>,

    /// HTTP client configuration.
    #[serde(default)]
    pub http: HttpConfig,

    /// Record store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Memo configuration.
    #[serde(default)]
    pub memo: MemoConfig,

    /// Base URL overrides per service.
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent to hosting services.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum URLs resolved concurrently.
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_concurrent_lookups: default_max_concurrent_lookups(),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Keep resolved records on disk across runs.
    #[serde(default = "default_true")]
    pub persist: bool,

    /// Store directory. Defaults to `<data_dir>/records`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            persist: true,
            path: None,
        }
    }
}

/// Memo configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoConfig {
    /// Entries remembered per service.
    #[serde(default = "default_memo_capacity")]
    pub capacity: usize,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            capacity: default_memo_capacity(),
        }
    }
}

/// Base URL overrides, for mirrors and local test servers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// CANON iMAGE GATEWAY site base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canon_image_gateway: Option<String>,

    /// Photozou API base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photozou: Option<String>,
}

impl EndpointsConfig {
    /// Returns the override for a service, if any.
    #[must_use]
    pub fn base_url(&self, kind: ServiceKind) -> Option<&str> {
        match kind {
            ServiceKind::CanonImageGateway => self.canon_image_gateway.as_deref(),
            ServiceKind::Photozou => self.photozou.as_deref(),
        }
    }
}

fn default_services() -> Vec<ServiceKind> {
    ServiceKind::ALL.to_vec()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_max_concurrent_lookups() -> usize {
    DEFAULT_MAX_CONCURRENT_LOOKUPS
}

fn default_memo_capacity() -> usize {
    DEFAULT_MEMO_CAPACITY
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    ///
    /// `--config` only picks the file [`ConfigLoader`](super::ConfigLoader)
    /// reads and is not part of the merged values.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(store_dir) = &args.store_dir {
            self.store.path = Some(store_dir.clone());
        }
        if args.no_persist {
            self.store.persist = false;
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.http.timeout_secs = timeout_secs;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::default(),
            services: default_services(),
            http: HttpConfig::default(),
            store: StoreConfig::default(),
            memo: MemoConfig::default(),
            endpoints: EndpointsConfig::default(),
        }
    }
}
