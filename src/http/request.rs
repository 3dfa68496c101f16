use std::collections::HashMap;

/// HTTP request methods.
///
/// Only the four verbs that map onto file operations are named; every other
/// token is carried through as `Other` and answered with 501.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Read a file
    Get,
    /// POST - Append to an existing file
    Post,
    /// PUT - Create or overwrite a file
    Put,
    /// DELETE - Remove a file
    Delete,
    /// Anything else, kept verbatim
    Other(String),
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Matching is case-sensitive, so `get` is `Other("get")`.
    ///
    /// # Example
    ///
    /// ```
    /// # use verbfs::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::Get);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Other(token) => token,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request read off one connection.
///
/// The body stays `None` until a POST or PUT handler reads it.
#[derive(Debug, Clone)]
pub struct Request {
    /// The method token
    pub method: Method,
    /// The raw request path, never normalized
    pub path: String,
    /// Header name to value, names compared case-sensitively
    pub headers: HashMap<String, String>,
    /// Request body, present once read by length
    pub body: Option<Vec<u8>>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Looks up a header by its exact name.
    ///
    /// No case folding: `accept` does not find `Accept`.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// The `Accept` value a GET is negotiated against.
    pub fn accept(&self) -> Option<&str> {
        self.header("Accept")
    }
}
