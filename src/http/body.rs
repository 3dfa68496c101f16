use crate::http::parser::ParseError;
use crate::http::request::Request;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Parses the declared `Content-Length` of a request.
pub fn content_length(req: &Request) -> Result<usize, ParseError> {
    let raw = req
        .header("Content-Length")
        .ok_or(ParseError::MissingContentLength)?;
    raw.parse::<usize>()
        .map_err(|_| ParseError::InvalidContentLength(raw.to_string()))
}

/// Reads exactly `Content-Length` bytes off the stream into `req.body`.
///
/// Waits for slow senders; a peer that closes early fails with
/// `UnexpectedEof` rather than yielding a short body.
pub async fn read_body<'a, R>(reader: &mut R, req: &'a mut Request) -> Result<&'a [u8], ParseError>
where
    R: AsyncRead + Unpin,
{
    let len = content_length(req)?;

    // Grows with the bytes that actually arrive, never with the declared length.
    let mut body = Vec::new();
    reader.take(len as u64).read_to_end(&mut body).await?;
    if body.len() != len {
        return Err(ParseError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("body ended after {} of {} bytes", body.len(), len),
        )));
    }

    Ok(req.body.insert(body).as_slice())
}
