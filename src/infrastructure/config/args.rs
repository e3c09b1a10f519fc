//! Command-line arguments.

use super::app_config::LogLevel;
use crate::domain::entities::ImageSize;
use clap::Parser;
use std::path::PathBuf;

/// Which image sizes to print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SizeArg {
    /// Original resolution.
    Full,
    /// Display resolution.
    Display,
    /// Thumbnail.
    Thumbnail,
    /// Every size.
    #[default]
    All,
}

impl SizeArg {
    /// Sizes selected by this argument, largest first.
    #[must_use]
    pub fn sizes(self) -> &'static [ImageSize] {
        match self {
            Self::Full => &[ImageSize::Full],
            Self::Display => &[ImageSize::Display],
            Self::Thumbnail => &[ImageSize::Thumbnail],
            Self::All => &ImageSize::ALL,
        }
    }
}

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "picfetch",
    version,
    about = "Resolve photo-sharing page URLs to direct image URLs",
    long_about = None
)]
pub struct CliArgs {
    /// Page URLs to resolve.
    #[arg(value_name = "URL", required_unless_present = "list_services")]
    pub urls: Vec<String>,

    /// Image size to print.
    #[arg(short, long, value_enum, default_value_t = SizeArg::All)]
    pub size: SizeArg,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// List supported services and exit.
    #[arg(long)]
    pub list_services: bool,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Record store directory.
    #[arg(long, value_name = "PATH", env = "PICFETCH_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    /// Keep resolved records in memory only.
    #[arg(long)]
    pub no_persist: bool,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_required() {
        assert!(CliArgs::try_parse_from(["picfetch"]).is_err());
    }

    #[test]
    fn test_list_services_without_urls() {
        let args = CliArgs::try_parse_from(["picfetch", "--list-services"]).unwrap();

        assert!(args.list_services);
        assert!(args.urls.is_empty());
    }

    #[test]
    fn test_size_flag() {
        let args = CliArgs::try_parse_from(["picfetch", "--size", "thumbnail", "http://a", "http://b"])
            .unwrap();

        assert_eq!(args.size, SizeArg::Thumbnail);
        assert_eq!(args.size.sizes(), &[ImageSize::Thumbnail]);
        assert_eq!(args.urls.len(), 2);
    }

    #[test]
    fn test_default_size_is_all() {
        let args = CliArgs::try_parse_from(["picfetch", "http://a"]).unwrap();

        assert_eq!(args.size.sizes(), &ImageSize::ALL);
    }
}
