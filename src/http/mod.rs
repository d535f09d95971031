//! HTTP protocol implementation.
//!
//! This module implements a small HTTP/1.1 server with support for keep-alive connections.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and accessors
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Route to a handler, build response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! use skiff::http::connection::Connection;
//! use skiff::routing;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(routing::default_router());
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = Arc::clone(&router);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router, PathBuf::from("."));
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
