use std::io::{self, Write};

use crate::application::dto::{UrlOutcome, UrlReport};
use crate::domain::entities::{ImageSize, Resolution, ServiceInfo};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Writes reports.
///
/// In text mode, resolved URLs go to `out` and everything else to `err`, so
/// piping stdout yields only image URLs. With a single size each found URL
/// prints as one bare line, and an album prints one line per item. JSON mode
/// writes the whole batch to `out`.
///
/// # Errors
/// Returns error if a writer fails.
pub fn render_reports(
    reports: &[UrlReport],
    sizes: &[ImageSize],
    format: OutputFormat,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, reports)?;
        return writeln!(out);
    }

    for report in reports {
        match &report.outcome {
            UrlOutcome::Resolved(Resolution::Found(image)) => {
                let items = image.images.album_items();
                if let [size] = sizes {
                    if items.is_empty() {
                        writeln!(out, "{}", image.images.url(*size))?;
                    }
                    for item in items {
                        writeln!(out, "{item}")?;
                    }
                } else {
                    writeln!(out, "{} [{}]", report.url, image.service)?;
                    for size in sizes {
                        writeln!(out, "  {:<9} {}", size.label(), image.images.url(*size))?;
                    }
                    for item in items {
                        writeln!(out, "  {:<9} {item}", "item")?;
                    }
                }
            }
            UrlOutcome::Resolved(Resolution::NotFound { service, identifier }) => {
                writeln!(err, "{}: {identifier} not found on {service}", report.url)?;
            }
            UrlOutcome::Failed(failure) => {
                writeln!(err, "{}: {}: {}", report.url, failure.kind.label(), failure.message)?;
            }
        }
    }
    Ok(())
}

/// Writes the supported service list.
///
/// # Errors
/// Returns error if the writer fails.
pub fn render_services(
    services: &[ServiceInfo],
    format: OutputFormat,
    out: &mut impl Write,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, services)?;
        return writeln!(out);
    }

    for service in services {
        writeln!(out, "{:<20} {}", service.id.as_str(), service.name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RawImageMetadata, ResolvedImageSet, ServiceId};
    use crate::domain::errors::ResolveError;

    fn reports() -> Vec<UrlReport> {
        vec![
            UrlReport::new(
                "http://photozou.jp/photo/show/1/42",
                Ok(Resolution::found(
                    ServiceId::new("photozou"),
                    ResolvedImageSet::from_metadata(
                        "42".into(),
                        RawImageMetadata::new("http://x/d.jpg", "http://x/t.jpg")
                            .with_original("http://x/o.jpg"),
                    ),
                )),
            ),
            UrlReport::new(
                "http://photozou.jp/photo/show/1/43",
                Ok(Resolution::NotFound {
                    service: ServiceId::new("photozou"),
                    identifier: "43".into(),
                }),
            ),
            UrlReport::new("http://example.com/a.jpg", Err(ResolveError::not_supported("http://example.com/a.jpg"))),
        ]
    }

    fn render(sizes: &[ImageSize], format: OutputFormat) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        render_reports(&reports(), sizes, format, &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_single_size_prints_bare_urls() {
        let (out, err) = render(&[ImageSize::Full], OutputFormat::Text);

        assert_eq!(out, "http://x/o.jpg\n");
        assert!(err.contains("43 not found on photozou"));
        assert!(err.contains("not supported"));
    }

    #[test]
    fn test_all_sizes_prints_block() {
        let (out, _) = render(&ImageSize::ALL, OutputFormat::Text);

        assert!(out.starts_with("http://photozou.jp/photo/show/1/42 [photozou]\n"));
        assert!(out.contains("  full      http://x/o.jpg\n"));
        assert!(out.contains("  display   http://x/d.jpg\n"));
        assert!(out.contains("  thumbnail http://x/t.jpg\n"));
    }

    #[test]
    fn test_json_writes_everything_to_out() {
        let (out, err) = render(&ImageSize::ALL, OutputFormat::Json);

        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(err.is_empty());
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[0]["original_url"], "http://x/o.jpg");
        assert_eq!(json[1]["status"], "not_found");
        assert_eq!(json[2]["status"], "error");
    }

    fn album_report() -> Vec<UrlReport> {
        vec![UrlReport::new(
            "http://opa.cig2.imagegateway.net/s/t/album/abc",
            Ok(Resolution::found(
                ServiceId::new("canon_image_gateway"),
                ResolvedImageSet::from_metadata(
                    "t/album/abc".into(),
                    RawImageMetadata::new("http://x/cover.jpg", "http://x/cover.jpg").with_album_items(vec![
                        "http://x/1.jpg".to_string(),
                        "http://x/2.jpg".to_string(),
                    ]),
                ),
            )),
        )]
    }

    #[test]
    fn test_album_prints_every_item() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        render_reports(&album_report(), &[ImageSize::Display], OutputFormat::Text, &mut out, &mut err).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "http://x/1.jpg\nhttp://x/2.jpg\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_album_block_lists_items() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        render_reports(&album_report(), &ImageSize::ALL, OutputFormat::Text, &mut out, &mut err).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  display   http://x/cover.jpg\n"));
        assert!(text.ends_with("  item      http://x/1.jpg\n  item      http://x/2.jpg\n"));
    }

    #[test]
    fn test_album_json_includes_items() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        render_reports(&album_report(), &ImageSize::ALL, OutputFormat::Json, &mut out, &mut err).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json[0]["album_items"][0], "http://x/1.jpg");
    }

    #[test]
    fn test_render_services() {
        let services = vec![
            ServiceInfo::new("canon_image_gateway", "CANON iMAGE GATEWAY"),
            ServiceInfo::new("photozou", "フォト蔵"),
        ];
        let mut out = Vec::new();

        render_services(&services, OutputFormat::Text, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("photozou"));
        assert!(lines[1].ends_with("フォト蔵"));
    }
}
