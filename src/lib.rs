pub mod configuration;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod proxy;
pub mod report;
pub mod transport;
pub mod transports;

pub use error::{FetchError, TransportError};
pub use extract::{extract, ContentExtractor, ExtractedContent, HeadingOrder};
pub use fetch::{FetchRequest, FetchResult, ProxiedFetcher};
pub use proxy::{Credentials, ProxyConfig};
pub use transport::{Fetched, Transport};
