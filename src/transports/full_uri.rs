use super::USER_AGENT;
use crate::error::{FetchError, TransportError};
use crate::proxy::ProxyConfig;
use crate::transport::{Fetched, Transport};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Url;
use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{lookup_host, TcpStream};

const MAX_HEADERS: usize = 64;

/// Writes the whole target URL into the request line and lets the proxy do
/// the upstream fetch. Nothing is tunnelled, https targets included, so no
/// TLS handshake happens on this side of the proxy.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullUriTransport;

impl FullUriTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for FullUriTransport {
    async fn get(&self, target: &Url, proxy: &ProxyConfig) -> Result<Fetched, FetchError> {
        if !proxy.verify_tls() && target.scheme() == "https" {
            warn!("verify_tls=false has no effect on full uri requests, the proxy terminates tls");
        }

        let addr = proxy.addr();
        let mut addrs = lookup_host((proxy.host(), proxy.port()))
            .await
            .map_err(|e| TransportError::Dns {
                proxy: addr.clone(),
                message: e.to_string(),
            })?;
        let sock = addrs.next().ok_or_else(|| TransportError::Dns {
            proxy: addr.clone(),
            message: "no addresses found".to_string(),
        })?;

        let mut stream = TcpStream::connect(sock)
            .await
            .map_err(|e| io_error(&addr, e))?;
        debug!("connected to proxy {} ({})", addr, sock);

        let request = build_request(target, proxy);
        stream
            .write_all(request.as_bytes())
            .await
            .map_err(|e| io_error(&addr, e))?;
        stream.flush().await.map_err(|e| io_error(&addr, e))?;

        let mut raw = Vec::new();
        stream
            .read_to_end(&mut raw)
            .await
            .map_err(|e| io_error(&addr, e))?;
        drop(stream);

        let fetched = parse_response(&raw).map_err(|message| TransportError::Protocol {
            proxy: addr.clone(),
            message,
        })?;
        if fetched.status_code == 407 {
            return Err(TransportError::ProxyAuthRejected {
                proxy: addr,
                status: fetched.status_code,
            }
            .into());
        }
        Ok(fetched)
    }

    fn name(&self) -> &'static str {
        "full_uri"
    }
}

fn io_error(proxy: &str, err: io::Error) -> FetchError {
    let proxy = proxy.to_string();
    let message = err.to_string();
    let transport = match err.kind() {
        io::ErrorKind::TimedOut => TransportError::Timeout { proxy, message },
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::AddrNotAvailable => TransportError::Connect { proxy, message },
        _ => TransportError::Request { proxy, message },
    };
    transport.into()
}

fn host_header(target: &Url) -> String {
    let host = target.host_str().unwrap_or_default();
    match target.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

pub(crate) fn build_request(target: &Url, proxy: &ProxyConfig) -> String {
    // fragments never leave the client
    let mut request_target = target.clone();
    request_target.set_fragment(None);

    let mut request = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: {}\r\nAccept: */*\r\nConnection: close\r\n",
        request_target,
        host_header(target),
        USER_AGENT
    );
    if let Some(creds) = proxy.credentials() {
        request.push_str(&format!("Proxy-Authorization: {}\r\n", creds.basic_auth()));
    }
    request.push_str("\r\n");
    request
}

pub(crate) fn parse_response(raw: &[u8]) -> Result<Fetched, String> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut resp = httparse::Response::new(&mut headers);

    let head_len = match resp.parse(raw) {
        Ok(httparse::Status::Complete(len)) => len,
        Ok(httparse::Status::Partial) => return Err("incomplete response head".to_string()),
        Err(e) => return Err(format!("invalid response head: {}", e)),
    };
    let status_code = resp.code.ok_or("response has no status code")?;

    let mut content_length = None;
    let mut chunked = false;
    for header in resp.headers.iter() {
        let value = String::from_utf8_lossy(header.value);
        let value = value.trim();
        if header.name.eq_ignore_ascii_case("content-length") {
            let len = value
                .parse::<usize>()
                .map_err(|_| format!("bad content-length `{}`", value))?;
            content_length = Some(len);
        } else if header.name.eq_ignore_ascii_case("transfer-encoding") {
            chunked = value.to_ascii_lowercase().contains("chunked");
        }
    }

    let mut body = &raw[head_len..];
    let decoded;
    if chunked {
        decoded = decode_chunked(body)?;
        body = &decoded;
    } else if let Some(len) = content_length {
        if len > body.len() {
            return Err(format!(
                "truncated body, got {} of {} bytes",
                body.len(),
                len
            ));
        }
        body = &body[..len];
    }

    Ok(Fetched {
        status_code,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

fn decode_chunked(mut raw: &[u8]) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    loop {
        let (consumed, size) = match httparse::parse_chunk_size(raw) {
            Ok(httparse::Status::Complete(parsed)) => parsed,
            Ok(httparse::Status::Partial) => return Err("truncated chunk size".to_string()),
            Err(_) => return Err("bad chunk size".to_string()),
        };
        raw = &raw[consumed..];
        if size == 0 {
            return Ok(out);
        }
        let size = usize::try_from(size).map_err(|_| "chunk too large".to_string())?;
        if raw.len() < size {
            return Err("truncated chunk".to_string());
        }
        out.extend_from_slice(&raw[..size]);
        raw = raw[size..].strip_prefix(b"\r\n").unwrap_or(&raw[size..]);
    }
}
