//! Test utilities for the backend client
//!
//! A tiny HTTP/1.1 server on `127.0.0.1` that answers each request from a
//! fixed route table and records what it received. One request per
//! connection; every response closes the connection.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A fixed response for one route.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl CannedResponse {
    /// `200 OK` with a JSON body.
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.into(),
        }
    }

    /// `200 OK` with a plain-text body.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/plain",
            body: body.into(),
        }
    }

    /// Any status with a plain-text body.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.into(),
        }
    }
}

/// A request as seen by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

type Routes = Arc<Vec<(String, CannedResponse)>>;
type Log = Arc<Mutex<Vec<RecordedRequest>>>;

/// Canned-response HTTP server. Stops when dropped.
pub struct TestServer {
    addr: SocketAddr,
    requests: Log,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Bind an ephemeral port and serve `routes`.
    ///
    /// Route keys are `"<METHOD> <path>"`, e.g. `"GET /api/v1/test"`.
    /// Unknown routes answer `404`.
    pub async fn start(routes: Vec<(&str, CannedResponse)>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let routes: Routes = Arc::new(
            routes
                .into_iter()
                .map(|(key, response)| (key.to_string(), response))
                .collect(),
        );
        let requests: Log = Arc::default();

        let log = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    if let Err(e) = serve_connection(stream, &routes, &log).await {
                        tracing::debug!("test server connection error: {e}");
                    }
                });
            }
        });

        Ok(Self {
            addr,
            requests,
            handle,
        })
    }

    /// Base URL with a trailing slash, e.g. `http://127.0.0.1:40123/`.
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Number of requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_connection(mut stream: TcpStream, routes: &Routes, log: &Log) -> std::io::Result<()> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();
    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = buf.len().min(body_start + content_length);
    let body = String::from_utf8_lossy(&buf[body_start.min(body_end)..body_end]).to_string();

    if let Ok(mut requests) = log.lock() {
        requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            body,
        });
    }

    let key = format!("{method} {path}");
    let response = routes
        .iter()
        .find(|(route, _)| *route == key)
        .map(|(_, response)| response.clone())
        .unwrap_or_else(|| CannedResponse::status(404, format!("no route for {key}")));

    let reply = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason(response.status),
        response.content_type,
        response.body.len(),
        response.body
    );
    stream.write_all(reply.as_bytes()).await?;
    stream.shutdown().await
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
