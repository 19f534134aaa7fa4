use crate::error::FetchError;
use crate::proxy::ProxyConfig;
use async_trait::async_trait;
use reqwest::Url;

/// What the proxy relayed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub status_code: u16,
    pub body: String,
}

/// One way of pushing a GET through a forward proxy.
///
/// Implementations open their own connection per call and release it before
/// returning, on success and failure alike.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, target: &Url, proxy: &ProxyConfig) -> Result<Fetched, FetchError>;
    fn name(&self) -> &'static str;
}
