use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response};

const HTTP_VERSION: &str = "HTTP/1.1";

fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    if let Some(content_type) = &resp.content_type {
        buf.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
    }
    if resp.content_length != 0 {
        buf.extend_from_slice(format!("Content-Length: {}\r\n", resp.content_length).as_bytes());
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Writes a response as two flushed writes: the header block, then the body.
pub struct ResponseWriter {
    head: Vec<u8>,
    body: Body,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: serialize_head(&response),
            body: response.body,
        }
    }

    pub fn head(&self) -> &[u8] {
        &self.head
    }

    /// Returns the number of body bytes written.
    pub async fn write_to_stream<W>(self, stream: &mut W) -> anyhow::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        stream.write_all(&self.head).await?;
        stream.flush().await?;

        let written = match self.body {
            Body::Empty => 0,
            Body::Bytes(bytes) => {
                stream.write_all(&bytes).await?;
                bytes.len() as u64
            }
            Body::File(mut file) => tokio::io::copy(&mut file, stream).await?,
        };
        if written > 0 {
            stream.flush().await?;
        }

        Ok(written)
    }
}
