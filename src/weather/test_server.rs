//! Throwaway HTTP servers on `127.0.0.1` for exercising the weather client.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const API_PATH: &str = "/data/2.5/weather";

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, format!("http://{addr}{API_PATH}"))
}

/// Serves a single canned response.
///
/// Returns the endpoint URL and a receiver yielding the request line the
/// server saw.
pub(crate) async fn respond_once(
    status: u16,
    body: &'static str,
) -> (String, oneshot::Receiver<String>) {
    let (listener, url) = bind().await;
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let head = String::from_utf8_lossy(&head);
        let request_line = head.lines().next().unwrap_or_default().to_owned();
        let _ = tx.send(request_line);

        let response = format!(
            "HTTP/1.1 {status} Stub\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n\
             {body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
    });

    (url, rx)
}

/// Accepts connections but never answers.
pub(crate) async fn never_respond() -> String {
    let (listener, url) = bind().await;

    tokio::spawn(async move {
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
    });

    url
}

/// URL of a port nothing listens on.
pub(crate) async fn closed_port() -> String {
    let (listener, url) = bind().await;
    drop(listener);
    url
}
