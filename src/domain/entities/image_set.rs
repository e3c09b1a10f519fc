//! Resolved image URL sets.

use serde::{Deserialize, Serialize};

use super::service::{ServiceId, ServiceIdentifier};

/// Image resolution requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// Original upload.
    Full,
    /// Large display rendition.
    Display,
    /// Thumbnail.
    Thumbnail,
}

impl ImageSize {
    /// All sizes, largest first.
    pub const ALL: [Self; 3] = [Self::Full, Self::Display, Self::Thumbnail];

    /// Returns the lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Display => "display",
            Self::Thumbnail => "thumbnail",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Metadata returned by a remote lookup, before defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImageMetadata {
    /// Display resolution URL.
    pub display_url: String,
    /// Thumbnail URL.
    pub thumbnail_url: String,
    /// Original resolution URL, when the service exposes one.
    pub original_url: Option<String>,
    /// Every image of a shared album, in page order. Empty for single photos.
    pub album_items: Vec<String>,
}

impl RawImageMetadata {
    /// Creates metadata without an original URL.
    #[must_use]
    pub fn new(display_url: impl Into<String>, thumbnail_url: impl Into<String>) -> Self {
        Self {
            display_url: display_url.into(),
            thumbnail_url: thumbnail_url.into(),
            original_url: None,
            album_items: Vec::new(),
        }
    }

    /// Sets the original URL.
    #[must_use]
    pub fn with_original(mut self, original_url: impl Into<String>) -> Self {
        self.original_url = Some(original_url.into());
        self
    }

    /// Sets the album item URLs.
    #[must_use]
    pub fn with_album_items(mut self, items: Vec<String>) -> Self {
        self.album_items = items;
        self
    }
}

/// Immutable set of direct image URLs for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImageSet {
    identifier: ServiceIdentifier,
    display_url: String,
    original_url: String,
    thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    album_items: Vec<String>,
}

impl ResolvedImageSet {
    /// Builds a set from remote metadata.
    /// A missing original falls back to the display URL.
    #[must_use]
    pub fn from_metadata(identifier: ServiceIdentifier, metadata: RawImageMetadata) -> Self {
        let original_url = metadata
            .original_url
            .unwrap_or_else(|| metadata.display_url.clone());
        Self {
            identifier,
            display_url: metadata.display_url,
            original_url,
            thumbnail_url: metadata.thumbnail_url,
            album_items: metadata.album_items,
        }
    }

    /// Identifier this set was resolved for.
    #[must_use]
    pub const fn identifier(&self) -> &ServiceIdentifier {
        &self.identifier
    }

    /// Display resolution URL.
    #[must_use]
    pub fn display_url(&self) -> &str {
        &self.display_url
    }

    /// Original resolution URL.
    #[must_use]
    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    /// Thumbnail URL.
    #[must_use]
    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    /// Image URLs of a shared album. Empty for single photos.
    #[must_use]
    pub fn album_items(&self) -> &[String] {
        &self.album_items
    }

    /// Returns true if this set describes an album.
    #[must_use]
    pub fn is_album(&self) -> bool {
        !self.album_items.is_empty()
    }

    /// Returns the URL for the requested size.
    #[must_use]
    pub fn url(&self, size: ImageSize) -> &str {
        match size {
            ImageSize::Full => self.original_url(),
            ImageSize::Display => self.display_url(),
            ImageSize::Thumbnail => self.thumbnail_url(),
        }
    }
}

/// A resolved set tagged with the service that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    /// Service that resolved the URL.
    pub service: ServiceId,
    /// Resolved URLs.
    #[serde(flatten)]
    pub images: ResolvedImageSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_falls_back_to_display() {
        let set = ResolvedImageSet::from_metadata(
            "42".into(),
            RawImageMetadata::new("http://x/d.jpg", "http://x/t.jpg"),
        );

        assert_eq!(set.original_url(), "http://x/d.jpg");
        assert_eq!(set.url(ImageSize::Full), "http://x/d.jpg");
        assert_eq!(set.url(ImageSize::Thumbnail), "http://x/t.jpg");
    }

    #[test]
    fn test_distinct_original_is_kept() {
        let set = ResolvedImageSet::from_metadata(
            "42".into(),
            RawImageMetadata::new("http://x/d.jpg", "http://x/t.jpg").with_original("http://x/o.jpg"),
        );

        assert_eq!(set.url(ImageSize::Full), "http://x/o.jpg");
        assert_eq!(set.url(ImageSize::Display), "http://x/d.jpg");
        assert_eq!(set.identifier().as_str(), "42");
    }

    #[test]
    fn test_serialized_shape() {
        let set = ResolvedImageSet::from_metadata(
            "7".into(),
            RawImageMetadata::new("http://x/d.jpg", "http://x/t.jpg"),
        );
        let json = serde_json::to_value(&set).unwrap();

        assert_eq!(json["identifier"], "7");
        assert_eq!(json["display_url"], "http://x/d.jpg");
        assert_eq!(json["original_url"], "http://x/d.jpg");
        assert_eq!(json["thumbnail_url"], "http://x/t.jpg");
    }

    #[test]
    fn test_album_items_kept_and_serialized() {
        let items = vec!["http://x/1.jpg".to_string(), "http://x/2.jpg".to_string()];
        let set = ResolvedImageSet::from_metadata(
            "t/album/abc".into(),
            RawImageMetadata::new("http://x/1.jpg", "http://x/1.jpg").with_album_items(items.clone()),
        );

        assert!(set.is_album());
        assert_eq!(set.album_items(), items.as_slice());
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["album_items"][1], "http://x/2.jpg");
    }

    #[test]
    fn test_records_without_album_items_still_load() {
        let json = r#"{"identifier":"7","display_url":"d","original_url":"o","thumbnail_url":"t"}"#;

        let set: ResolvedImageSet = serde_json::from_str(json).unwrap();

        assert!(!set.is_album());
        let out = serde_json::to_value(&set).unwrap();
        assert!(out.get("album_items").is_none());
    }
}
