//! Outcome of resolving a URL through the registry.

use serde::Serialize;

use super::image_set::{ResolvedImage, ResolvedImageSet};
use super::service::{ServiceId, ServiceIdentifier};

/// Result of a successful dispatch to a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    /// The service returned image URLs.
    Found(ResolvedImage),
    /// The service reports no such item.
    NotFound {
        /// Service that handled the URL.
        service: ServiceId,
        /// Identifier that was looked up.
        identifier: ServiceIdentifier,
    },
}

impl Resolution {
    /// Creates a found resolution.
    #[must_use]
    pub const fn found(service: ServiceId, images: ResolvedImageSet) -> Self {
        Self::Found(ResolvedImage { service, images })
    }

    /// Returns the service that handled the URL.
    #[must_use]
    pub const fn service(&self) -> &ServiceId {
        match self {
            Self::Found(image) => &image.service,
            Self::NotFound { service, .. } => service,
        }
    }

    /// Returns the image set, if found.
    #[must_use]
    pub const fn images(&self) -> Option<&ResolvedImageSet> {
        match self {
            Self::Found(image) => Some(&image.images),
            Self::NotFound { .. } => None,
        }
    }

    /// Returns true if the service found the item.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
