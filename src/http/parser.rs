use crate::http::request::{Method, Request};
use std::collections::HashMap;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug)]
pub enum ParseError {
    /// Request line without both a method and a path
    MalformedRequestLine(String),
    /// Header line without a `": "` separator
    MalformedHeader(String),
    /// A body was needed but no `Content-Length` was sent
    MissingContentLength,
    /// `Content-Length` is not a non-negative integer
    InvalidContentLength(String),
    Io(std::io::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedRequestLine(line) => write!(f, "malformed request line {:?}", line),
            ParseError::MalformedHeader(line) => write!(f, "malformed header line {:?}", line),
            ParseError::MissingContentLength => f.write_str("missing Content-Length header"),
            ParseError::InvalidContentLength(v) => write!(f, "invalid Content-Length {:?}", v),
            ParseError::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e)
    }
}

/// Reads the request line and header block.
///
/// Returns `Ok(None)` for an empty connection: nothing arrived within
/// `ready_timeout`, or the peer closed before sending a byte. The body is
/// left unread on the stream.
pub async fn read_request<R>(reader: &mut R, ready_timeout: Duration) -> Result<Option<Request>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    match tokio::time::timeout(ready_timeout, reader.fill_buf()).await {
        Err(_) => return Ok(None),
        Ok(Err(e)) => return Err(e.into()),
        Ok(Ok(buf)) if buf.is_empty() => return Ok(None),
        Ok(Ok(_)) => {}
    }

    let line = read_line(reader).await?.unwrap_or_default();
    let (method, path) = parse_request_line(&line)?;

    let mut headers = HashMap::new();
    while let Some(line) = read_line(reader).await? {
        if line.is_empty() {
            break;
        }
        let (key, value) = parse_header_line(&line)?;
        headers.insert(key.to_string(), value.to_string());
    }

    Ok(Some(Request {
        method,
        path: path.to_string(),
        headers,
        body: None,
    }))
}

/// Splits a request line into method and path. Anything after the path,
/// such as the protocol version, is ignored.
pub fn parse_request_line(line: &str) -> Result<(Method, &str), ParseError> {
    let mut parts = line.split(' ');
    let method = parts.next().filter(|m| !m.is_empty());
    let path = parts.next().filter(|p| !p.is_empty());

    match (method, path) {
        (Some(method), Some(path)) => Ok((Method::parse(method), path)),
        _ => Err(ParseError::MalformedRequestLine(line.to_string())),
    }
}

/// Splits a header line on its first `": "`.
pub fn parse_header_line(line: &str) -> Result<(&str, &str), ParseError> {
    line.split_once(": ")
        .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))
}

/// One line without its terminator, or `None` at EOF.
async fn read_line<R>(reader: &mut R) -> Result<Option<String>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}
