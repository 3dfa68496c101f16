//! Method handlers.
//!
//! Each handler writes exactly one response to the connection. Errors that
//! escape a handler (bad `Content-Length`, file I/O failures, a dropped
//! socket) abandon the connection without a response.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::Config;
use crate::fs::resolver::ResourceResolver;
use crate::http::body;
use crate::http::error_page::ErrorPage;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

/// Appended after every POST and PUT body.
const LINE_TERMINATOR: &[u8] = b"\n";

/// The response a handler wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub status: StatusCode,
    /// Body bytes written after the header block
    pub body_len: u64,
}

/// Dispatches requests to the per-verb file operations.
#[derive(Debug, Clone)]
pub struct FileHandler {
    resolver: ResourceResolver,
    allowed_mime_types: HashSet<String>,
    error_page: ErrorPage,
}

impl FileHandler {
    pub fn new(
        resolver: ResourceResolver,
        allowed_mime_types: HashSet<String>,
        error_page: ErrorPage,
    ) -> Self {
        Self {
            resolver,
            allowed_mime_types,
            error_page,
        }
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self::new(
            ResourceResolver::new(&cfg.files.root),
            cfg.allowed_mime_types(),
            ErrorPage::new(cfg.image_base()?),
        ))
    }

    pub fn resolver(&self) -> &ResourceResolver {
        &self.resolver
    }

    /// Runs the operation for `req.method` and writes its response.
    ///
    /// POST and PUT read the body from `conn` by `Content-Length`.
    pub async fn handle<S>(&self, req: &mut Request, conn: &mut BufReader<S>) -> Result<Outcome>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let path = self.resolver.resolve(&req.path);
        let method = req.method.clone();

        tracing::debug!(method = %method, path = %path.display(), "Dispatching request");

        match method {
            Method::Get => self.get(req, &path, conn.get_mut()).await,
            Method::Post => self.post(req, &path, conn).await,
            Method::Put => self.put(req, &path, conn).await,
            Method::Delete => self.delete(&path, conn.get_mut()).await,
            Method::Other(_) => {
                respond(conn.get_mut(), Response::not_implemented(&self.error_page)).await
            }
        }
    }

    /// Serves the whole file typed as the client's `Accept` value.
    ///
    /// The allow-list is checked before the file system is touched, so a
    /// disallowed type gets 406 even for a missing file.
    async fn get<W>(&self, req: &Request, path: &Path, out: &mut W) -> Result<Outcome>
    where
        W: AsyncWrite + Unpin,
    {
        let mime = match req.accept() {
            Some(mime) if self.allowed_mime_types.contains(mime) => mime,
            _ => return respond(out, Response::not_acceptable(&self.error_page)).await,
        };

        if !exists(path).await? {
            return respond(out, Response::not_found(&self.error_page)).await;
        }

        let file = fs::File::open(path)
            .await
            .with_context(|| format!("opening {}", path.display()))?;
        let len = file.metadata().await?.len();

        respond(out, Response::file(mime, file, len)).await
    }

    /// Appends the body and a line terminator to an existing file.
    async fn post<S>(&self, req: &mut Request, path: &Path, conn: &mut BufReader<S>) -> Result<Outcome>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        if !exists(path).await? {
            return respond(conn.get_mut(), Response::not_found(&self.error_page)).await;
        }

        let body = body::read_body(conn, req).await?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("opening {} for append", path.display()))?;
        file.write_all(body).await?;
        file.write_all(LINE_TERMINATOR).await?;
        file.flush().await?;

        respond(conn.get_mut(), Response::ok()).await
    }

    /// Creates or truncates the file, then writes the body and a line terminator.
    async fn put<S>(&self, req: &mut Request, path: &Path, conn: &mut BufReader<S>) -> Result<Outcome>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let body = body::read_body(conn, req).await?;

        let mut contents = Vec::with_capacity(body.len() + LINE_TERMINATOR.len());
        contents.extend_from_slice(body);
        contents.extend_from_slice(LINE_TERMINATOR);
        fs::write(path, contents)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        respond(conn.get_mut(), Response::ok()).await
    }

    /// Acknowledges with 200, then removes the file.
    ///
    /// The response is on the wire before the removal runs, so a client
    /// reading it cannot assume the file is already gone.
    async fn delete<W>(&self, path: &Path, out: &mut W) -> Result<Outcome>
    where
        W: AsyncWrite + Unpin,
    {
        if !exists(path).await? {
            return respond(out, Response::not_found(&self.error_page)).await;
        }

        let outcome = respond(out, Response::ok()).await?;

        let removed = if fs::metadata(path).await?.is_dir() {
            fs::remove_dir(path).await
        } else {
            fs::remove_file(path).await
        };
        removed.with_context(|| format!("removing {}", path.display()))?;

        Ok(outcome)
    }
}

async fn exists(path: &Path) -> Result<bool> {
    fs::try_exists(path)
        .await
        .with_context(|| format!("checking {}", path.display()))
}

async fn respond<W>(out: &mut W, response: Response) -> Result<Outcome>
where
    W: AsyncWrite + Unpin,
{
    let status = response.status;
    let body_len = ResponseWriter::new(response).write_to_stream(out).await?;
    Ok(Outcome { status, body_len })
}
