//! Hosting service clients and the built-in service catalog.

pub mod canon_image_gateway;
pub mod catalog;
pub mod http;
pub mod photozou;

pub use canon_image_gateway::CanonImageGatewayClient;
pub use catalog::{CatalogError, ServiceKind, build_registry};
pub use http::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, build_client};
pub use photozou::PhotozouClient;
