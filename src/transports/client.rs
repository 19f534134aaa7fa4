use super::new_client;
use crate::error::{chain_message, FetchError, TransportError};
use crate::proxy::ProxyConfig;
use crate::transport::{Fetched, Transport};
use async_trait::async_trait;
use log::debug;
use reqwest::{StatusCode, Url};
use std::error::Error as _;

/// High-level client: plain http goes to the proxy in absolute form, https is
/// tunnelled with CONNECT and verified end to end.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClientTransport;

impl ClientTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for ClientTransport {
    async fn get(&self, target: &Url, proxy: &ProxyConfig) -> Result<Fetched, FetchError> {
        let client = new_client(proxy)?;

        let resp = client
            .get(target.clone())
            .send()
            .await
            .map_err(|e| classify(&e, proxy))?;

        let status = resp.status();
        debug!("{} via {} -> {}", target, proxy.addr(), status);
        if status == StatusCode::PROXY_AUTHENTICATION_REQUIRED {
            return Err(TransportError::ProxyAuthRejected {
                proxy: proxy.addr(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = resp.text().await.map_err(|e| classify(&e, proxy))?;
        Ok(Fetched {
            status_code: status.as_u16(),
            body,
        })
    }

    fn name(&self) -> &'static str {
        "client"
    }
}

fn classify(err: &reqwest::Error, proxy: &ProxyConfig) -> FetchError {
    let proxy = proxy.addr();
    let message = chain_message(err);
    // the top-level message carries the target url, only the causes are inspected
    let causes = cause_text(err);

    let transport = if tunnel_auth_rejected(&causes) {
        TransportError::ProxyAuthRejected {
            proxy,
            status: StatusCode::PROXY_AUTHENTICATION_REQUIRED.as_u16(),
        }
    } else if err.is_timeout() {
        TransportError::Timeout { proxy, message }
    } else if looks_like_tls(&causes) {
        TransportError::Tls { proxy, message }
    } else if err.is_connect() {
        TransportError::Connect { proxy, message }
    } else {
        TransportError::Request { proxy, message }
    };
    transport.into()
}

fn cause_text(err: &reqwest::Error) -> String {
    let mut causes = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        causes.push(cause.to_string().to_ascii_lowercase());
        source = cause.source();
    }
    causes.join(": ")
}

// a 407 on CONNECT surfaces as an error, not a response
fn tunnel_auth_rejected(causes: &str) -> bool {
    causes.contains("proxy authorization required")
        || causes.contains("proxy authentication required")
}

// reqwest does not expose tls failures as their own kind
fn looks_like_tls(causes: &str) -> bool {
    ["certificate", "handshake", "ssl", "tls"]
        .iter()
        .any(|needle| causes.contains(needle))
}
