use crate::http::request::Request;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The request line did not carry both a method and a path.
    #[error("request line has fewer than two tokens")]
    InvalidRequestLine,
    /// The header block was not valid UTF-8.
    #[error("header block is not valid UTF-8")]
    InvalidHeaderBlock,
}

/// Parses the bytes received in one read call into a [`Request`].
///
/// The input is split on the first CRLF CRLF: everything before is the
/// header block, everything after is the body. When the separator is absent
/// the whole input is the header block and the body is empty. The request
/// line is split on single spaces and only the first two tokens (method and
/// path) are consumed; the version token is not validated. Header lines
/// without a ": " separator are silently ignored, duplicate names keep the
/// last value, and the body is taken as-is - `Content-Length` is never
/// checked against it.
pub fn parse_request(raw: &[u8]) -> Result<Request, ParseError> {
    let (header_bytes, body) = match find_headers_end(raw) {
        Some(pos) => (&raw[..pos], &raw[pos + 4..]),
        None => (raw, &raw[raw.len()..]),
    };

    let header_block =
        std::str::from_utf8(header_bytes).map_err(|_| ParseError::InvalidHeaderBlock)?;

    let mut lines = header_block.split("\r\n");
    let request_line = lines.next().unwrap_or_default();

    let mut tokens = request_line.split(' ');
    let method = tokens.next().ok_or(ParseError::InvalidRequestLine)?;
    let path = tokens.next().ok_or(ParseError::InvalidRequestLine)?;

    let mut headers = HashMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(": ") {
            headers.insert(name.to_string(), value.to_string());
        }
    }

    Ok(Request {
        method: method.to_string(),
        path: path.to_string(),
        headers,
        body: body.to_vec(),
    })
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = parse_request(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();

        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/");
        assert_eq!(req.headers.get("Host").unwrap(), "example.com");
        assert!(req.body.is_empty());
    }
}
