//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{
    ImageSize, RawImageMetadata, ResolvedImage, ResolvedImageSet, Resolution, ServiceId,
    ServiceIdentifier, ServiceInfo,
};
pub use errors::{LookupError, ResolveError, StoreError};
pub use ports::{InsertOutcome, RecordStorePort, RemoteLookupPort, UrlResolverPort};
