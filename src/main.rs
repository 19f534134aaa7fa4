use proxyfetch::configuration::{Settings, TransportKind};
use proxyfetch::report::{render_extracted, render_result};
use proxyfetch::transports::{ClientTransport, FullUriTransport};
use proxyfetch::{ContentExtractor, FetchResult, ProxiedFetcher};

#[tokio::main]
async fn main() {
    // Initialize logger
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn) // Default warn
        .filter_module("proxyfetch", log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load config.toml: {}. Using defaults.", e);
            Settings::default()
        }
    };

    let request = match settings.fetch_request() {
        Ok(request) => request,
        Err(e) => {
            println!("Configuration error: {}", e);
            return;
        }
    };

    let fetcher = match settings.target.transport {
        TransportKind::Client => ProxiedFetcher::new(ClientTransport::new()),
        TransportKind::FullUri => ProxiedFetcher::new(FullUriTransport::new()),
    };

    let result = fetcher.fetch(request).await;
    match &result {
        FetchResult::Success { body, .. } if settings.target.extract => {
            let extractor = ContentExtractor::with_order(settings.target.heading_order);
            print!("{}", render_extracted(&extractor.extract(body)));
        }
        _ => println!("{}", render_result(&result)),
    }
}
