use bytes::BytesMut;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::http::request::Request;
use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// CORS headers injected into every response unless the handler already
/// set the same name, in which case the handler's value is kept.
const CORS_DEFAULTS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type, Accept, Accept-Encoding, X-Requested-With",
    ),
];

fn serialize_response(resp: &Response, req: &Request) -> BytesMut {
    let mut headers = resp.headers.clone();

    for (name, value) in CORS_DEFAULTS {
        headers
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }

    // Computed from the body, never taken from the handler
    headers.insert("Content-Length".to_string(), resp.body.len().to_string());

    // Confirmation echo for an explicit close request
    if !req.keep_alive() {
        headers.insert("Connection".to_string(), "close".to_string());
    }

    let mut buf = BytesMut::with_capacity(256 + resp.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers; emission order is not part of the contract
    for (name, value) in &headers {
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(&resp.body);

    buf
}

/// A response serialized against its originating request, ready for one
/// send to the socket.
pub struct ResponseWriter {
    buffer: BytesMut,
    written: usize,
}

impl ResponseWriter {
    /// Serializes `response`, injecting the computed headers: exact
    /// `Content-Length`, the CORS defaults, and a `Connection: close` echo
    /// when `request` asked for one.
    pub fn new(response: &Response, request: &Request) -> Self {
        Self {
            buffer: serialize_response(response, request),
            written: 0,
        }
    }

    /// The serialized bytes exactly as they will hit the wire.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Sends the complete serialized response.
    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        Ok(())
    }
}
