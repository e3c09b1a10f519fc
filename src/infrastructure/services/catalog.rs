//! Built-in services and registry construction.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::canon_image_gateway::CanonImageGatewayClient;
use super::http::build_client;
use super::photozou::PhotozouClient;
use crate::domain::entities::ServiceInfo;
use crate::domain::errors::LookupError;
use crate::domain::ports::{RecordStorePort, RemoteLookupPort};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::resolver::{RegistryError, ResolverRegistry, ServiceAdapter};

static PHOTOZOU_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://(?:www\.)?photozou\.jp/photo/(?:show|photo_only)/\d+/(?P<id>\d+)/?(?:\?.*)?$",
    )
    .expect("Invalid regex")
});

static CANON_IMAGE_GATEWAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://opa\.cig2\.imagegateway\.net/s/(?P<id>(?:[tm]/)?(?:album/)?\w+(?:/\w+)?)/?(?:\?.*)?(?:#.*)?$",
    )
    .expect("Invalid regex")
});

/// A built-in hosting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// CANON iMAGE GATEWAY shared pages.
    CanonImageGateway,
    /// Photozou (フォト蔵).
    Photozou,
}

impl ServiceKind {
    /// Every built-in service, alphabetical by id.
    pub const ALL: [Self; 2] = [Self::CanonImageGateway, Self::Photozou];

    /// Stable machine name, also used to namespace stored records.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::CanonImageGateway => "canon_image_gateway",
            Self::Photozou => "photozou",
        }
    }

    /// Human-readable service name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::CanonImageGateway => "CANON iMAGE GATEWAY",
            Self::Photozou => "フォト蔵",
        }
    }

    /// URL pattern with an `id` capture group.
    #[must_use]
    pub fn pattern(self) -> &'static Regex {
        match self {
            Self::CanonImageGateway => &CANON_IMAGE_GATEWAY_PATTERN,
            Self::Photozou => &PHOTOZOU_PATTERN,
        }
    }

    /// Service description for listings.
    #[must_use]
    pub fn info(self) -> ServiceInfo {
        ServiceInfo::new(self.id(), self.display_name())
    }

    fn lookup(self, client: Client, base_url: Option<&str>) -> Arc<dyn RemoteLookupPort> {
        match (self, base_url) {
            (Self::CanonImageGateway, Some(base)) => {
                Arc::new(CanonImageGatewayClient::with_base_url(client, base))
            }
            (Self::CanonImageGateway, None) => Arc::new(CanonImageGatewayClient::new(client)),
            (Self::Photozou, Some(base)) => Arc::new(PhotozouClient::with_base_url(client, base)),
            (Self::Photozou, None) => Arc::new(PhotozouClient::new(client)),
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Errors building the registry from configuration.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The shared HTTP client could not be created.
    #[error(transparent)]
    Client(#[from] LookupError),
    /// The configured service list is invalid.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Builds the resolver registry for the configured services, in order.
///
/// All adapters share one HTTP client and the given record store.
///
/// # Errors
/// Returns error if the HTTP client cannot be created or a service is listed
/// twice.
pub fn build_registry(
    config: &AppConfig,
    store: Arc<dyn RecordStorePort>,
) -> Result<ResolverRegistry, CatalogError> {
    let client = build_client(&config.http.user_agent, config.http.timeout_secs)?;

    let adapters = config
        .services
        .iter()
        .map(|&kind| {
            let base_url = config.endpoints.base_url(kind);
            debug!(service = %kind, base_url = ?base_url, "Registering service");
            ServiceAdapter::new(
                kind.info(),
                kind.pattern().clone(),
                kind.lookup(client.clone(), base_url),
                Arc::clone(&store),
            )
            .with_memo_capacity(config.memo.capacity)
        })
        .collect();

    let registry = ResolverRegistry::new(adapters)?;
    info!(services = registry.len(), "Resolver registry ready");
    Ok(registry)
}
