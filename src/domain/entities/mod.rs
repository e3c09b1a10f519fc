//! Domain entity definitions.

mod image_set;
mod resolution;
mod service;

pub use image_set::{ImageSize, RawImageMetadata, ResolvedImage, ResolvedImageSet};
pub use resolution::Resolution;
pub use service::{ServiceId, ServiceIdentifier, ServiceInfo};
