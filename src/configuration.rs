use crate::extract::HeadingOrder;
use crate::fetch::FetchRequest;
use crate::proxy::ProxyConfig;
use anyhow::Result;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub proxy: ProxySettings,
    pub target: TargetSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub verify_tls: bool,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 80,
            username: None,
            password: None,
            verify_tls: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    #[default]
    Client,
    FullUri,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TargetSettings {
    pub url: String,
    pub transport: TransportKind,
    pub extract: bool,
    pub heading_order: HeadingOrder,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            url: "https://httpbin.org/get".to_string(),
            transport: TransportKind::Client,
            extract: false,
            heading_order: HeadingOrder::ByLevel,
        }
    }
}

impl Settings {
    /// Reads `config.toml` from the working directory, defaults if it is absent.
    pub fn new() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config_data = match fs::read_to_string(path.as_ref()) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "{} not found, using default settings",
                    path.as_ref().display()
                );
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&config_data)
    }

    pub fn parse(config_data: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(config_data)?;
        Ok(settings)
    }

    pub fn proxy_config(&self) -> Result<ProxyConfig> {
        let proxy = &self.proxy;
        let config = ProxyConfig::from_parts(
            proxy.host.clone(),
            proxy.port,
            proxy.username.clone(),
            proxy.password.clone(),
        )?
        .with_verify_tls(proxy.verify_tls);
        Ok(config)
    }

    pub fn fetch_request(&self) -> Result<FetchRequest> {
        Ok(FetchRequest::new(self.target.url.clone(), self.proxy_config()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.proxy.host, "localhost");
        assert_eq!(settings.proxy.port, 80);
        assert!(settings.proxy.verify_tls);
        assert_eq!(settings.target.url, "https://httpbin.org/get");
        assert_eq!(settings.target.transport, TransportKind::Client);
        assert!(!settings.target.extract);
        assert_eq!(settings.target.heading_order, HeadingOrder::ByLevel);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = Settings::load("/nonexistent/proxyfetch/config.toml").unwrap();
        assert_eq!(settings.proxy.port, 80);
    }

    #[test]
    fn parses_full_file() {
        let settings = Settings::parse(
            r#"
            [proxy]
            host = "brd.example.test"
            port = 22225
            username = "user"
            password = "pass"
            verify_tls = false

            [target]
            url = "https://en.wikipedia.org/wiki/Proxy_server"
            transport = "full_uri"
            extract = true
            heading_order = "document"
            "#,
        )
        .unwrap();

        let proxy = settings.proxy_config().unwrap();
        assert_eq!(proxy.addr(), "brd.example.test:22225");
        assert!(!proxy.verify_tls());
        assert_eq!(proxy.credentials().unwrap().username, "user");
        assert_eq!(settings.target.transport, TransportKind::FullUri);
        assert!(settings.target.extract);
        assert_eq!(settings.target.heading_order, HeadingOrder::Document);
    }

    #[test]
    fn half_credentials_fail_validation() {
        let settings = Settings::parse(
            r#"
            [proxy]
            username = "user"
            "#,
        )
        .unwrap();
        assert!(settings.proxy_config().is_err());
        assert!(settings.fetch_request().is_err());
    }

    #[test]
    fn unknown_heading_order_is_an_error() {
        assert!(Settings::parse("[target]\nheading_order = \"alphabetical\"").is_err());
    }

    #[test]
    fn unknown_transport_is_an_error() {
        assert!(Settings::parse("[target]\ntransport = \"carrier_pigeon\"").is_err());
    }
}
