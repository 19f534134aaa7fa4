use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("malformed target url `{url}`: {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("invalid proxy configuration: {0}")]
    InvalidProxy(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failures on the way to, or through, the proxy.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("cannot resolve proxy {proxy}: {message}")]
    Dns { proxy: String, message: String },

    #[error("cannot connect to proxy {proxy}: {message}")]
    Connect { proxy: String, message: String },

    #[error("request through proxy {proxy} timed out: {message}")]
    Timeout { proxy: String, message: String },

    #[error("tls failure via proxy {proxy}: {message}")]
    Tls { proxy: String, message: String },

    #[error("proxy {proxy} rejected the credentials (status {status})")]
    ProxyAuthRejected { proxy: String, status: u16 },

    #[error("malformed response from proxy {proxy}: {message}")]
    Protocol { proxy: String, message: String },

    #[error("request through proxy {proxy} failed: {message}")]
    Request { proxy: String, message: String },
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

/// Joins an error and all of its sources into one line.
pub(crate) fn chain_message(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
