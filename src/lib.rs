//! picfetch - resolve photo-sharing page URLs to direct image URLs.
//!
//! A URL is dispatched to the first registered service whose pattern
//! matches. Each service answers from a small in-memory memo, then from a
//! durable record store, and only then asks the hosting service itself.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer rendering results for the terminal.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "picfetch";
