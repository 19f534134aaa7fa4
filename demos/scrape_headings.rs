use proxyfetch::report::{render_extracted, render_result};
use proxyfetch::transports::ClientTransport;
use proxyfetch::{extract, FetchRequest, FetchResult, ProxiedFetcher, ProxyConfig};

#[tokio::main]
async fn main() {
    env_logger::builder().filter_level(log::LevelFilter::Info).init();

    let proxy = match ProxyConfig::from_parts(
        "<PROXY_HOST>",
        22225,
        Some("<PROXY_USERNAME>".to_string()),
        Some("<PROXY_PASSWORD>".to_string()),
    ) {
        Ok(proxy) => proxy.with_verify_tls(false),
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    let fetcher = ProxiedFetcher::new(ClientTransport::new());
    let result = fetcher
        .fetch(FetchRequest::new(
            "https://en.wikipedia.org/wiki/Proxy_server",
            proxy,
        ))
        .await;

    match &result {
        FetchResult::Success { body, .. } => print!("{}", render_extracted(&extract(body))),
        FetchResult::Failure { .. } => println!("{}", render_result(&result)),
    }
}
