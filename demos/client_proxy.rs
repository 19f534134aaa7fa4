use proxyfetch::report::render_result;
use proxyfetch::transports::ClientTransport;
use proxyfetch::{FetchRequest, ProxiedFetcher, ProxyConfig};

#[tokio::main]
async fn main() {
    env_logger::builder().filter_level(log::LevelFilter::Info).init();

    // Local forward proxy; certificate checks are off for self-signed MITM proxies.
    let proxy = match "http://localhost:80".parse::<ProxyConfig>() {
        Ok(proxy) => proxy.with_verify_tls(false),
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    let fetcher = ProxiedFetcher::new(ClientTransport::new());
    let result = fetcher
        .fetch(FetchRequest::new("https://httpbin.org/get", proxy))
        .await;

    println!("{}", render_result(&result));
}
