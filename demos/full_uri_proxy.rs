use proxyfetch::report::render_result;
use proxyfetch::transports::FullUriTransport;
use proxyfetch::{FetchRequest, ProxiedFetcher, ProxyConfig};

#[tokio::main]
async fn main() {
    env_logger::builder().filter_level(log::LevelFilter::Info).init();

    let proxy = match "tcp://localhost:80".parse::<ProxyConfig>() {
        Ok(proxy) => proxy,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    // The proxy receives `GET https://httpbin.org/get HTTP/1.0` and fetches it itself.
    let fetcher = ProxiedFetcher::new(FullUriTransport::new());
    let result = fetcher
        .fetch(FetchRequest::new("https://httpbin.org/get", proxy))
        .await;

    println!("{}", render_result(&result));
}
