//! Domain error types.

mod lookup_error;
mod resolve_error;
mod store_error;

pub use lookup_error::LookupError;
pub use resolve_error::ResolveError;
pub use store_error::StoreError;
