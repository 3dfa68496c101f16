#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use url::Url;
use verbfs::fs::{FileHandler, Outcome, ResourceResolver};
use verbfs::http::connection::Connection;
use verbfs::http::error_page::{DEFAULT_IMAGE_BASE, ErrorPage};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// A fresh, empty directory under the system temp dir.
pub fn temp_root() -> PathBuf {
    let n = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("verbfs-test-{}-{}", std::process::id(), n));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn error_page() -> ErrorPage {
    ErrorPage::new(Url::parse(DEFAULT_IMAGE_BASE).unwrap())
}

pub fn handler(root: &PathBuf) -> Arc<FileHandler> {
    let allowed: HashSet<String> = ["text/html", "text/plain"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    Arc::new(FileHandler::new(
        ResourceResolver::new(root),
        allowed,
        error_page(),
    ))
}

/// A response as seen by the client.
pub struct RawResponse {
    pub head: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn parse(raw: &[u8]) -> Self {
        let split = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("response has no header terminator");
        Self {
            head: String::from_utf8(raw[..split + 4].to_vec()).unwrap(),
            body: raw[split + 4..].to_vec(),
        }
    }

    pub fn status_line(&self) -> &str {
        self.head.split("\r\n").next().unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        let prefix = format!("{}: ", name);
        self.head
            .split("\r\n")
            .skip(1)
            .find_map(|line| line.strip_prefix(prefix.as_str()))
    }

    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length").map(|v| v.parse().unwrap())
    }
}

/// Runs one request through a full connection over an in-memory pipe.
pub async fn exchange(
    handler: Arc<FileHandler>,
    request: &[u8],
) -> (anyhow::Result<Option<Outcome>>, Vec<u8>) {
    let (mut client, server) = tokio::io::duplex(64 * 1024);

    let task = tokio::spawn(async move {
        let mut conn = Connection::new(server, handler, Duration::from_secs(1));
        conn.run().await
    });

    client.write_all(request).await.unwrap();

    let mut raw = Vec::new();
    client.read_to_end(&mut raw).await.unwrap();

    (task.await.unwrap(), raw)
}

/// Like `exchange`, but expects a served request.
pub async fn send(handler: Arc<FileHandler>, request: &[u8]) -> RawResponse {
    let (result, raw) = exchange(handler, request).await;
    result.expect("connection failed").expect("connection was empty");
    RawResponse::parse(&raw)
}
