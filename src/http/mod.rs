//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, no
//! keep-alive, no chunked bodies.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Reads the request line and headers off a buffered stream
//! - **`body`**: Reads a body of exactly `Content-Length` bytes
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes responses, header block first
//! - **`error_page`**: The HTML page sent with every error status
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │  Received   │ ← Ready check, request line, headers
//!        └──────┬──────┘
//!               │ Request parsed          (nothing sent → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatched     │ ← Method handler runs the file operation
//!        └──────┬───────────┘
//!               │
//!               ├─ Response written → Responded
//!               └─ I/O or protocol error → Errored
//! ```
//!
//! Every path ends with the socket closed.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use verbfs::fs::FileHandler;
//! use verbfs::http::connection::Connection;
//!
//! let (socket, _addr) = listener.accept().await?;
//! let mut conn = Connection::new(socket, Arc::new(handler), Duration::from_millis(500));
//! if let Err(e) = conn.run().await {
//!     tracing::error!("Connection error: {}", e);
//! }
//! ```

pub mod body;
pub mod connection;
pub mod error_page;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
