//! Photozou (フォト蔵) photo_info API client.

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::http::get_text;
use crate::domain::entities::{RawImageMetadata, ServiceIdentifier};
use crate::domain::errors::LookupError;
use crate::domain::ports::RemoteLookupPort;

/// Default API base URL.
pub const PHOTOZOU_API_BASE: &str = "http://api.photozou.jp";

/// `<rsp>` root of a photo_info response.
#[derive(Debug, Deserialize)]
struct PhotoInfoResponse {
    #[serde(rename = "@stat", default)]
    stat: Option<String>,
    info: Option<InfoElement>,
}

#[derive(Debug, Deserialize)]
struct InfoElement {
    photo: Option<PhotoElement>,
}

#[derive(Debug, Deserialize)]
struct PhotoElement {
    image_url: Option<String>,
    original_image_url: Option<String>,
    thumbnail_image_url: Option<String>,
}

/// Looks up photos through the Photozou REST API.
pub struct PhotozouClient {
    client: Client,
    base_url: String,
}

impl PhotozouClient {
    /// Creates a client against the public API.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, PHOTOZOU_API_BASE)
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
impl RemoteLookupPort for PhotozouClient {
    async fn fetch(&self, identifier: &ServiceIdentifier) -> Result<RawImageMetadata, LookupError> {
        let url = format!("{}/rest/photo_info?photo_id={}", self.base_url, identifier);
        debug!(url = %url, "Requesting Photozou photo info");

        let (_, body) = get_text(&self.client, &url).await?;
        parse_photo_info(&body)
    }
}

/// Parses a photo_info XML document.
///
/// Only an `<rsp stat="fail">` document without `<info>` means the photo
/// does not exist. Any other shape is malformed.
///
/// # Errors
/// Returns `NotFound` for a failed `<rsp>`, `MalformedResponse` when the
/// document, its root or its `<photo>` element cannot be interpreted.
pub fn parse_photo_info(body: &str) -> Result<RawImageMetadata, LookupError> {
    match root_element(body)? {
        Some(root) if root == "rsp" => {}
        Some(root) => {
            return Err(LookupError::malformed(format!(
                "unexpected photo_info root <{root}>"
            )));
        }
        None => return Err(LookupError::malformed("empty photo_info response")),
    }

    let response: PhotoInfoResponse = quick_xml::de::from_str(body)
        .map_err(|e| LookupError::malformed(format!("invalid photo_info XML: {e}")))?;

    let Some(info) = response.info else {
        return match response.stat.as_deref() {
            Some("fail") => {
                debug!("photo_info reported failure");
                Err(LookupError::NotFound)
            }
            stat => Err(LookupError::malformed(format!(
                "photo_info without info element (stat {stat:?})"
            ))),
        };
    };

    let photo = info
        .photo
        .ok_or_else(|| LookupError::malformed("info element has no photo"))?;

    let image = non_empty(photo.image_url)
        .ok_or_else(|| LookupError::malformed("photo has no image_url"))?;
    let thumbnail = non_empty(photo.thumbnail_image_url)
        .ok_or_else(|| LookupError::malformed("photo has no thumbnail_image_url"))?;

    let metadata = RawImageMetadata::new(image, thumbnail);
    Ok(match non_empty(photo.original_image_url) {
        Some(original) => metadata.with_original(original),
        None => metadata,
    })
}

/// Name of the document's first element, skipping the prolog.
fn root_element(body: &str) -> Result<Option<String>, LookupError> {
    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                return Ok(Some(String::from_utf8_lossy(e.name().as_ref()).into_owned()));
            }
            Ok(Event::Eof) => return Ok(None),
            Ok(_) => {}
            Err(e) => {
                return Err(LookupError::malformed(format!("invalid photo_info XML: {e}")));
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const FOUND: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rsp stat="ok">
  <info>
    <photo>
      <photo_id>12345</photo_id>
      <user_id>678</user_id>
      <photo_title>sunset</photo_title>
      <image_url>http://photozou.jp/p/img/12345</image_url>
      <original_image_url>http://photozou.jp/p/org/12345</original_image_url>
      <thumbnail_image_url>http://photozou.jp/p/thumb/12345</thumbnail_image_url>
    </photo>
  </info>
</rsp>"#;

    #[test]
    fn test_parse_found() {
        let metadata = parse_photo_info(FOUND).unwrap();

        assert_eq!(metadata.display_url, "http://photozou.jp/p/img/12345");
        assert_eq!(
            metadata.original_url.as_deref(),
            Some("http://photozou.jp/p/org/12345")
        );
        assert_eq!(metadata.thumbnail_url, "http://photozou.jp/p/thumb/12345");
    }

    #[test]
    fn test_parse_without_original() {
        let body = r#"<rsp stat="ok"><info><photo>
            <image_url>http://x/d.jpg</image_url>
            <thumbnail_image_url>http://x/t.jpg</thumbnail_image_url>
        </photo></info></rsp>"#;

        let metadata = parse_photo_info(body).unwrap();

        assert_eq!(metadata, RawImageMetadata::new("http://x/d.jpg", "http://x/t.jpg"));
    }

    #[test]
    fn test_parse_failed_response_is_not_found() {
        let body = r#"<rsp stat="fail"><err code="ERROR_NOT_FOUND" msg="photo not found"/></rsp>"#;

        assert_eq!(parse_photo_info(body), Err(LookupError::NotFound));
    }

    #[test_case(r#"<rsp stat="ok"></rsp>"# ; "ok_without_info")]
    #[test_case(r#"<rsp stat="ok"/>"# ; "empty_ok")]
    #[test_case("<rsp></rsp>" ; "no_stat")]
    #[test_case("<html><body>503 Service Unavailable</body></html>" ; "html_error_page")]
    #[test_case(r#"<?xml version="1.0"?><error stat="fail"/>"# ; "other_root")]
    #[test_case("" ; "empty_body")]
    fn test_unexpected_shape_is_malformed(body: &str) {
        assert!(matches!(
            parse_photo_info(body),
            Err(LookupError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_missing_image_is_malformed() {
        let body = r#"<rsp stat="ok"><info><photo>
            <thumbnail_image_url>http://x/t.jpg</thumbnail_image_url>
        </photo></info></rsp>"#;

        assert!(matches!(
            parse_photo_info(body),
            Err(LookupError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_info_without_photo_is_malformed() {
        let body = r#"<rsp stat="ok"><info></info></rsp>"#;

        assert!(matches!(
            parse_photo_info(body),
            Err(LookupError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_broken_xml_is_malformed() {
        assert!(matches!(
            parse_photo_info(r#"<rsp stat="ok"><info><photo></info></rsp>"#),
            Err(LookupError::MalformedResponse(_))
        ));
    }
}
