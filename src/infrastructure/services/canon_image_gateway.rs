//! CANON iMAGE GATEWAY shared-page scraper.
//!
//! Full-size URLs on this service change on every request, so only the
//! page's `og:image` is used, for every size. Album pages additionally list
//! every item under `#jsAlbumItemList`.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::debug;

use super::http::get_text;
use crate::domain::entities::{RawImageMetadata, ServiceIdentifier};
use crate::domain::errors::LookupError;
use crate::domain::ports::RemoteLookupPort;

/// Default site base URL.
pub const CANON_IMAGE_GATEWAY_BASE: &str = "http://opa.cig2.imagegateway.net";

/// Text the site renders in place of a deleted or private share.
const NOT_FOUND_MARKER: &str = "該当するデータはありません。";

/// Element id wrapping the item list of an album page.
const ALBUM_LIST_ID: &str = "jsAlbumItemList";

/// Resolves shared photo and album pages to their `og:image`.
pub struct CanonImageGatewayClient {
    client: Client,
    base_url: String,
}

impl CanonImageGatewayClient {
    /// Creates a client against the public site.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, CANON_IMAGE_GATEWAY_BASE)
    }

    /// Creates a client with a custom base URL.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RemoteLookupPort for CanonImageGatewayClient {
    async fn fetch(&self, identifier: &ServiceIdentifier) -> Result<RawImageMetadata, LookupError> {
        let url = format!("{}/s/{}", self.base_url, identifier);
        debug!(url = %url, "Requesting CANON iMAGE GATEWAY page");

        let (_, html) = get_text(&self.client, &url).await?;
        if is_album(identifier) {
            parse_album_page(&html)
        } else {
            parse_shared_page(&html)
        }
    }
}

fn is_album(identifier: &ServiceIdentifier) -> bool {
    identifier.as_str().split('/').any(|segment| segment == "album")
}

/// Extracts the image from a shared page.
///
/// # Errors
/// Returns `NotFound` when the page reports the share is gone and
/// `MalformedResponse` when it has no `og:image`.
pub fn parse_shared_page(html: &str) -> Result<RawImageMetadata, LookupError> {
    if html.contains(NOT_FOUND_MARKER) {
        return Err(LookupError::NotFound);
    }

    let image = extract_og_image(html)
        .ok_or_else(|| LookupError::malformed("page has no og:image"))?;

    Ok(RawImageMetadata::new(image.clone(), image.clone()).with_original(image))
}

/// Extracts every item of a shared album page.
///
/// The primary image is the page's `og:image`, falling back to the first
/// item when the page has none.
///
/// # Errors
/// Returns `NotFound` when the page reports the share is gone and
/// `MalformedResponse` when it has neither an `og:image` nor any item.
pub fn parse_album_page(html: &str) -> Result<RawImageMetadata, LookupError> {
    if html.contains(NOT_FOUND_MARKER) {
        return Err(LookupError::NotFound);
    }

    let items = extract_album_items(html);
    let cover = extract_og_image(html)
        .or_else(|| items.first().cloned())
        .ok_or_else(|| LookupError::malformed("album page has no og:image and no items"))?;

    debug!(items = items.len(), "Parsed album page");
    Ok(RawImageMetadata::new(cover.clone(), cover.clone())
        .with_original(cover)
        .with_album_items(items))
}

fn extract_album_items(html: &str) -> Vec<String> {
    static IMG_REGEX: OnceLock<Regex> = OnceLock::new();
    static SRC_REGEX: OnceLock<Regex> = OnceLock::new();

    let Some(list) = album_list_body(html) else {
        return Vec::new();
    };

    let img_regex = IMG_REGEX.get_or_init(|| Regex::new(r"(?is)<img\s[^>]*>").expect("Invalid regex"));
    let src_regex = SRC_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)src\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("Invalid regex")
    });

    img_regex
        .find_iter(list)
        .filter_map(|tag| {
            let caps = src_regex.captures(tag.as_str())?;
            caps.get(1).or_else(|| caps.get(2))
        })
        .map(|m| m.as_str().trim().replace("&amp;", "&"))
        .filter(|url| !url.is_empty())
        .collect()
}

/// Returns the inner HTML of the album list element, up to its matching
/// close tag or the end of the document.
fn album_list_body(html: &str) -> Option<&str> {
    static OPEN_REGEX: OnceLock<Regex> = OnceLock::new();
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

    let open_regex = OPEN_REGEX.get_or_init(|| {
        Regex::new(&format!(
            r#"(?is)<([a-z][a-z0-9]*)\b[^>]*\bid\s*=\s*["']{ALBUM_LIST_ID}["'][^>]*>"#
        ))
        .expect("Invalid regex")
    });
    let tag_regex =
        TAG_REGEX.get_or_init(|| Regex::new(r"(?is)<(/?)([a-z][a-z0-9]*)\b[^>]*?(/?)>").expect("Invalid regex"));

    let open = open_regex.captures(html)?;
    let name = open.get(1)?.as_str();
    let start = open.get(0)?.end();
    let rest = &html[start..];

    let mut depth = 1usize;
    for tag in tag_regex.captures_iter(rest) {
        if !tag[2].eq_ignore_ascii_case(name) {
            continue;
        }
        if !tag[1].is_empty() {
            depth -= 1;
            if depth == 0 {
                return Some(&rest[..tag.get(0)?.start()]);
            }
        } else if tag[3].is_empty() {
            depth += 1;
        }
    }
    Some(rest)
}

fn extract_og_image(html: &str) -> Option<String> {
    static META_REGEX: OnceLock<Regex> = OnceLock::new();
    static PROPERTY_REGEX: OnceLock<Regex> = OnceLock::new();
    static CONTENT_REGEX: OnceLock<Regex> = OnceLock::new();

    let meta_regex = META_REGEX.get_or_init(|| Regex::new(r"(?is)<meta\s[^>]*>").expect("Invalid regex"));
    let property_regex = PROPERTY_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)\bproperty\s*=\s*["']og:image["']"#).expect("Invalid regex")
    });
    let content_regex = CONTENT_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)\bcontent\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("Invalid regex")
    });

    meta_regex
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|tag| property_regex.is_match(tag))
        .find_map(|tag| {
            let caps = content_regex.captures(tag)?;
            caps.get(1).or_else(|| caps.get(2))
        })
        .map(|m| m.as_str().trim().replace("&amp;", "&"))
        .filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_og_image_extracted() {
        let html = r#"
            <html>
                <head>
                    <meta property="og:title" content="My trip">
                    <meta property="og:image" content="https://cig.example/img/1.jpg?a=1&amp;b=2" />
                </head>
            </html>
        "#;

        let metadata = parse_shared_page(html).unwrap();

        assert_eq!(metadata.display_url, "https://cig.example/img/1.jpg?a=1&b=2");
        assert_eq!(metadata.thumbnail_url, metadata.display_url);
        assert_eq!(metadata.original_url.as_deref(), Some(metadata.display_url.as_str()));
    }

    #[test]
    fn test_attribute_order_does_not_matter() {
        let html = r#"<meta content='https://cig.example/2.jpg' property='og:image'>"#;

        assert_eq!(
            extract_og_image(html).as_deref(),
            Some("https://cig.example/2.jpg")
        );
    }

    #[test]
    fn test_not_found_marker() {
        let html = "<html><body><p>該当するデータはありません。</p></body></html>";

        assert_eq!(parse_shared_page(html), Err(LookupError::NotFound));
    }

    #[test]
    fn test_missing_og_image_is_malformed() {
        let html = r#"<html><head><meta property="og:title" content="x"></head></html>"#;

        assert!(matches!(
            parse_shared_page(html),
            Err(LookupError::MalformedResponse(_))
        ));
    }

    const ALBUM_PAGE: &str = r#"
        <html>
            <head>
                <meta property="og:image" content="https://cig.example/cover.jpg">
            </head>
            <body>
                <img src="https://cig.example/logo.png">
                <ul id="jsAlbumItemList" class="album">
                    <li><div><img src="https://cig.example/a/1.jpg?x=1&amp;y=2" alt=""></div></li>
                    <li><div><img data-src="lazy" src='https://cig.example/a/2.jpg'/></div></li>
                    <li><img src=""></li>
                    <li><img alt="no source"></li>
                </ul>
                <ul class="footer"><li><img src="https://cig.example/banner.png"></li></ul>
            </body>
        </html>
    "#;

    #[test]
    fn test_album_items_extracted_in_order() {
        let metadata = parse_album_page(ALBUM_PAGE).unwrap();

        assert_eq!(
            metadata.album_items,
            vec![
                "https://cig.example/a/1.jpg?x=1&y=2".to_string(),
                "https://cig.example/a/2.jpg".to_string(),
            ]
        );
        assert_eq!(metadata.display_url, "https://cig.example/cover.jpg");
    }

    #[test]
    fn test_album_without_og_image_uses_first_item() {
        let html = r#"<div id="jsAlbumItemList"><div><img src="https://cig.example/a/9.jpg"></div></div><img src="x">"#;

        let metadata = parse_album_page(html).unwrap();

        assert_eq!(metadata.display_url, "https://cig.example/a/9.jpg");
        assert_eq!(metadata.album_items, vec!["https://cig.example/a/9.jpg".to_string()]);
    }

    #[test]
    fn test_album_without_list_keeps_cover() {
        let html = r#"<meta property="og:image" content="https://cig.example/cover.jpg">"#;

        let metadata = parse_album_page(html).unwrap();

        assert_eq!(metadata.display_url, "https://cig.example/cover.jpg");
        assert!(metadata.album_items.is_empty());
    }

    #[test]
    fn test_empty_album_page_is_malformed() {
        let html = r#"<html><body><ul id="jsAlbumItemList"></ul></body></html>"#;

        assert!(matches!(
            parse_album_page(html),
            Err(LookupError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_album_not_found_marker() {
        let html = "<html><body><p>該当するデータはありません。</p></body></html>";

        assert_eq!(parse_album_page(html), Err(LookupError::NotFound));
    }

    #[test]
    fn test_album_detection() {
        assert!(is_album(&"t/album/abc123".into()));
        assert!(is_album(&"album/abc123".into()));
        assert!(!is_album(&"t/abc123".into()));
        assert!(!is_album(&"albumx/abc".into()));
    }
}
