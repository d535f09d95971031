use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::warn;

use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

const ECHO_PREFIX: &str = "/echo/";
const FILES_PREFIX: &str = "/files/";

/// The closed set of endpoint behaviors this server knows.
///
/// One variant per behavior, dispatched by a match rather than through
/// boxed closures: every handler has the same shape - parsed request and
/// served root in, exactly one response out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// 200 with an empty body, whatever the request looked like.
    Root,
    /// Echoes the path remainder after `/echo/`, gzip-compressed when the
    /// client accepts it.
    Echo,
    /// Echoes the `User-Agent` header value.
    UserAgent,
    /// CORS preflight: 204 with only the default permission headers.
    Preflight,
    /// Serves a file from under the root directory.
    FileRead,
    /// Creates or truncates a file under the root directory from the
    /// request body.
    FileCreate,
}

impl Handler {
    /// Runs the endpoint behavior for `req` against `root`.
    ///
    /// Never fails: every handler-level problem maps to a response (404
    /// for unreadable files, 500 for failed writes).
    pub async fn respond(&self, req: &Request, root: &Path) -> Response {
        match self {
            Handler::Root => Response::empty(StatusCode::Ok),
            Handler::Echo => echo(req),
            Handler::UserAgent => user_agent(req),
            Handler::Preflight => Response::empty(StatusCode::NoContent),
            Handler::FileRead => read_file(req, root).await,
            Handler::FileCreate => create_file(req, root).await,
        }
    }
}

fn echo(req: &Request) -> Response {
    let content = req.path.strip_prefix(ECHO_PREFIX).unwrap_or(&req.path);

    let builder = ResponseBuilder::new(StatusCode::Ok).header("Content-Type", "text/plain");

    if req.accepts_gzip() {
        match gzip(content.as_bytes()) {
            Ok(compressed) => {
                return builder
                    .header("Content-Encoding", "gzip")
                    .body(compressed)
                    .build();
            }
            Err(e) => warn!(error = %e, "gzip failed, answering identity"),
        }
    }

    builder.body(content.as_bytes().to_vec()).build()
}

fn user_agent(req: &Request) -> Response {
    let agent = req.header("User-Agent").unwrap_or_default();

    ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .body(agent.as_bytes().to_vec())
        .build()
}

async fn read_file(req: &Request, root: &Path) -> Response {
    let path = resolve(root, file_name(&req.path));

    match tokio::fs::read(&path).await {
        Ok(data) => ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "application/octet-stream")
            .body(data)
            .build(),
        // Missing, unreadable, or a directory: the client only learns 404.
        Err(_) => Response::not_found(),
    }
}

async fn create_file(req: &Request, root: &Path) -> Response {
    let path = resolve(root, file_name(&req.path));

    match tokio::fs::write(&path, &req.body).await {
        Ok(()) => Response::empty(StatusCode::Created),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "file write failed");
            Response::empty(StatusCode::InternalServerError)
        }
    }
}

fn file_name(path: &str) -> &str {
    path.strip_prefix(FILES_PREFIX).unwrap_or(path)
}

/// Joins a client-supplied relative name onto the served root without
/// letting it escape: empty and `.` segments are dropped, `..` pops at
/// most back to the root.
fn resolve(root: &Path, name: &str) -> PathBuf {
    let mut stack: Vec<&str> = Vec::new();

    for segment in name.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }

    let mut resolved = root.to_path_buf();
    for segment in stack {
        resolved.push(segment);
    }
    resolved
}

/// Compresses `data` into a complete gzip stream (header, deflate body,
/// CRC32 trailer).
fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_clamps_traversal_at_root() {
        let root = Path::new("/srv/files");

        assert_eq!(resolve(root, "a.txt"), PathBuf::from("/srv/files/a.txt"));
        assert_eq!(
            resolve(root, "../../etc/passwd"),
            PathBuf::from("/srv/files/etc/passwd")
        );
        assert_eq!(
            resolve(root, "a/../b/./c"),
            PathBuf::from("/srv/files/b/c")
        );
        assert_eq!(resolve(root, ""), PathBuf::from("/srv/files"));
    }
}
