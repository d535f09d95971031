use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::http::parser::parse_request;
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::routing::Router;

/// Size of one receive. A request larger than this is truncated at the
/// transport and parsed from whatever arrived; reads are never
/// reassembled.
const READ_BUFFER_SIZE: usize = 1024;

pub struct Connection {
    stream: TcpStream,
    router: Arc<Router>,
    root: PathBuf,
    state: ConnectionState,
}

/// Lifecycle of one connection. Parsing happens on the `Reading` to
/// `Dispatching` edge; an unparseable read stays in `Reading`.
pub enum ConnectionState {
    Reading,
    Dispatching(Request),
    Responding(ResponseWriter, bool), // bool = keep the connection afterward?
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, router: Arc<Router>, root: PathBuf) -> Self {
        Self {
            stream,
            router,
            root,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection until it closes.
    ///
    /// The worker task owns the socket, so every exit path - clean close,
    /// transport error, panic - releases it when the connection drops.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    let mut buf = [0u8; READ_BUFFER_SIZE];
                    let n = self.stream.read(&mut buf).await?;

                    if n == 0 {
                        // Client closed its end
                        self.state = ConnectionState::Closed;
                        continue;
                    }

                    match parse_request(&buf[..n]) {
                        Ok(req) => {
                            self.state = ConnectionState::Dispatching(req);
                        }
                        Err(e) => {
                            // Malformed reads get no response; the
                            // connection stays open for the next request.
                            debug!(error = %e, "dropping unparseable read");
                        }
                    }
                }

                ConnectionState::Dispatching(req) => {
                    let response = self.router.dispatch(req, &self.root).await;

                    info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Request handled"
                    );

                    let keep_alive = req.keep_alive();
                    let writer = ResponseWriter::new(&response, req);
                    self.state = ConnectionState::Responding(writer, keep_alive);
                }

                ConnectionState::Responding(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *keep_alive {
                        self.state = ConnectionState::Reading; // go back for the next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }
}
