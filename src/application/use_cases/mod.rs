//! Use case implementations.

mod resolve_urls_use_case;

pub use resolve_urls_use_case::ResolveUrlsUseCase;
