use bytes::Bytes;

use crate::http::error_page::ErrorPage;

/// Content type of every error page.
pub const ERROR_CONTENT_TYPE: &str = "text/html";

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): file read, written, appended or deleted
/// - `NotFound` (404): the addressed file does not exist
/// - `NotAcceptable` (406): GET asked for a type outside the allow-list
/// - `NotImplemented` (501): method other than GET/POST/PUT/DELETE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 406 Not Acceptable
    NotAcceptable,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use verbfs::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotAcceptable.as_u16(), 406);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::NotAcceptable => 406,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the reason phrase written on the status line.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotAcceptable => "Not Acceptable",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// What follows the header block.
#[derive(Debug)]
pub enum Body {
    /// Headers only
    Empty,
    /// An in-memory body such as an error page
    Bytes(Bytes),
    /// An open file streamed after the headers
    File(tokio::fs::File),
}

/// A response about to be written.
///
/// `Content-Type` is only sent when `content_type` is set and
/// `Content-Length` only when `content_length` is non-zero.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub content_length: u64,
    pub body: Body,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("text/plain")
///     .bytes("hello")
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: Option<String>,
    content_length: Option<u64>,
    body: Body,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            content_length: None,
            body: Body::Empty,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Overrides the length, needed for file bodies.
    pub fn content_length(mut self, len: u64) -> Self {
        self.content_length = Some(len);
        self
    }

    /// Sets an in-memory body.
    pub fn bytes(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Body::Bytes(body.into());
        self
    }

    pub fn file(mut self, file: tokio::fs::File) -> Self {
        self.body = Body::File(file);
        self
    }

    /// Builds the final Response.
    ///
    /// Without an explicit length, in-memory bodies report their own size.
    pub fn build(self) -> Response {
        let content_length = self.content_length.unwrap_or(match &self.body {
            Body::Bytes(b) => b.len() as u64,
            _ => 0,
        });

        Response {
            status: self.status,
            content_type: self.content_type,
            content_length,
            body: self.body,
        }
    }
}

impl Response {
    /// 200 with no headers beyond the status line.
    pub fn ok() -> Self {
        ResponseBuilder::new(StatusCode::Ok).build()
    }

    /// 200 streaming `file`, typed with the negotiated `mime`.
    pub fn file(mime: &str, file: tokio::fs::File, len: u64) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(mime)
            .content_length(len)
            .file(file)
            .build()
    }

    /// An error page for `status`; the length comes from the rendered markup.
    pub fn error(status: StatusCode, page: &ErrorPage) -> Self {
        ResponseBuilder::new(status)
            .content_type(ERROR_CONTENT_TYPE)
            .bytes(page.render(status))
            .build()
    }

    pub fn not_found(page: &ErrorPage) -> Self {
        Self::error(StatusCode::NotFound, page)
    }

    pub fn not_acceptable(page: &ErrorPage) -> Self {
        Self::error(StatusCode::NotAcceptable, page)
    }

    pub fn not_implemented(page: &ErrorPage) -> Self {
        Self::error(StatusCode::NotImplemented, page)
    }
}
