mod record_store_port;
mod remote_lookup_port;
mod url_resolver_port;

pub use record_store_port::{InsertOutcome, RecordStorePort};
pub use remote_lookup_port::RemoteLookupPort;
pub use url_resolver_port::UrlResolverPort;
