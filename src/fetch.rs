use crate::error::FetchError;
use crate::proxy::ProxyConfig;
use crate::transport::{Fetched, Transport};
use log::{debug, error, info};
use reqwest::Url;

#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub target_url: String,
    pub proxy: ProxyConfig,
}

impl FetchRequest {
    pub fn new(target_url: impl Into<String>, proxy: ProxyConfig) -> Self {
        Self {
            target_url: target_url.into(),
            proxy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Success { body: String, status_code: u16 },
    Failure { message: String },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }
}

impl From<Result<Fetched, FetchError>> for FetchResult {
    fn from(result: Result<Fetched, FetchError>) -> Self {
        match result {
            Ok(fetched) => FetchResult::Success {
                body: fetched.body,
                status_code: fetched.status_code,
            },
            Err(e) => FetchResult::Failure {
                message: e.to_string(),
            },
        }
    }
}

pub struct ProxiedFetcher {
    transport: Box<dyn Transport>,
}

impl ProxiedFetcher {
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Performs the request and reports every failure as data.
    pub async fn fetch(&self, request: FetchRequest) -> FetchResult {
        self.try_fetch(request).await.into()
    }

    pub async fn try_fetch(&self, request: FetchRequest) -> Result<Fetched, FetchError> {
        let target = match parse_target(&request.target_url) {
            Ok(target) => target,
            Err(e) => {
                error!("refusing to fetch: {}", e);
                return Err(e);
            }
        };

        debug!(
            "fetching {} via {} using {}",
            target,
            request.proxy,
            self.transport.name()
        );
        match self.transport.get(&target, &request.proxy).await {
            Ok(fetched) => {
                info!(
                    "{} answered {} ({} bytes)",
                    target,
                    fetched.status_code,
                    fetched.body.len()
                );
                Ok(fetched)
            }
            Err(e) => {
                error!("cannot fetch {} via {}: {}", target, request.proxy, e);
                Err(e)
            }
        }
    }
}

/// Absolute http(s) URL with a host, or `MalformedUrl`.
pub fn parse_target(raw: &str) -> Result<Url, FetchError> {
    let malformed = |reason: String| FetchError::MalformedUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| malformed(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(malformed(format!("unsupported scheme {}", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(malformed("missing host".to_string()));
    }
    Ok(url)
}
