pub mod client;
pub mod full_uri;

pub use client::ClientTransport;
pub use full_uri::FullUriTransport;

use crate::error::FetchError;
use crate::proxy::ProxyConfig;
use log::warn;
use reqwest::Client;

pub(crate) const USER_AGENT: &str = concat!("proxyfetch/", env!("CARGO_PKG_VERSION"));

/// One-off client routed through `proxy`, nothing kept idle afterwards.
pub fn new_client(proxy: &ProxyConfig) -> Result<Client, FetchError> {
    let mut route = reqwest::Proxy::all(proxy.url())
        .map_err(|e| FetchError::InvalidProxy(format!("{}: {}", proxy.addr(), e)))?;
    if let Some(creds) = proxy.credentials() {
        route = route.basic_auth(&creds.username, &creds.password);
    }

    let mut builder = Client::builder()
        .proxy(route)
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(0);

    if !proxy.verify_tls() {
        warn!(
            "tls verification disabled for requests via {}, any certificate will be accepted",
            proxy
        );
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| FetchError::InvalidProxy(format!("cannot build client for {}: {}", proxy, e)))
}
