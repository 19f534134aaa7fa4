use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// In-process stand-in for a forward proxy. Every request is answered with
/// `status` and a body holding the request head it received.
pub struct EchoProxy {
    pub addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
}

impl EchoProxy {
    pub async fn start(status: u16) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("echo proxy failed to bind");
        let addr = listener.local_addr().expect("echo proxy has no address");
        let accepted = Arc::new(AtomicUsize::new(0));

        let counter = accepted.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(serve(stream, status));
            }
        });

        Self { addr, accepted }
    }

    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }
}

async fn serve(mut stream: TcpStream, status: u16) {
    let mut head = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let size = match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(size) => size,
        };
        head.extend_from_slice(&buf[..size]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    let body = String::from_utf8_lossy(&head).into_owned();
    let reason = match status {
        200 => "OK",
        407 => "Proxy Authentication Required",
        _ => "Whatever",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe listener");
    let addr = listener.local_addr().expect("probe listener has no address");
    drop(listener);
    addr
}
