use std::collections::HashMap;

/// Represents a parsed HTTP request from a client.
///
/// Carries exactly what the parser extracted from one network read. The
/// method is kept as the raw token string rather than an enum: unknown
/// methods parse fine and simply fall through the route table to the 404
/// fallback instead of being rejected.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method token (e.g. "GET", "POST"), case preserved
    pub method: String,
    /// The request path exactly as sent, unescaped
    pub path: String,
    /// Request headers as name/value pairs; names are case-sensitive
    pub headers: HashMap<String, String>,
    /// Raw bytes that followed the header/body separator in the same read
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<String>,
    path: Option<String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the request. Method and path are mandatory: there is no such
    /// thing as a partially-valid request.
    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves a header value by name.
    ///
    /// Lookup is case-sensitive: names are stored exactly as they appeared
    /// on the wire and are never normalized, so callers must use the
    /// conventional casing ("User-Agent", "Accept-Encoding", ...).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|v| v.as_str())
    }

    /// Whether the client advertised gzip support.
    ///
    /// True iff the `Accept-Encoding` value contains the substring "gzip"
    /// anywhere, e.g. as one entry of a comma-separated list.
    pub fn accepts_gzip(&self) -> bool {
        self.header("Accept-Encoding")
            .is_some_and(|v| v.contains("gzip"))
    }

    /// Determines whether the connection should remain open after the
    /// response.
    ///
    /// Persistent connections are the default; only the exact header value
    /// `Connection: close` asks for termination.
    pub fn keep_alive(&self) -> bool {
        self.header("Connection") != Some("close")
    }
}
