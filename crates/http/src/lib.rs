//! A small asynchronous HTTP/1.1 server transport.
//!
//! This crate is the transport collaborator of `pico-web`: it accepts bytes from a
//! connection, decodes complete requests, hands them to a [`handler::Handler`] and
//! writes the buffered responses back. It knows nothing about routing.
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use http::{Request, Response, StatusCode};
//! use http_body_util::Full;
//! use std::error::Error;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//! use pico_http::connection::HttpConnection;
//! use pico_http::handler::make_handler;
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             if let Err(e) = connection.process(handler).await {
//!                 error!("service has error, cause {}, connection shutdown", e);
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request<Bytes>) -> Result<Response<Full<Bytes>>, Box<dyn Error + Send + Sync>> {
//!     info!(path = request.uri().path(), body_size = request.body().len(), "receive request");
//!     Ok(Response::builder().status(StatusCode::OK).body(Full::new(Bytes::from("Hello World!\r\n")))?)
//! }
//! ```
//!
//! # Architecture
//!
//! - [`connection`]: connection lifecycle and keep-alive
//! - [`protocol`]: request header type and error taxonomy
//! - [`codec`]: request decoding and response encoding
//! - [`handler`]: the handler trait a connection drives
//!
//! # Limitations
//!
//! - HTTP/1.0 and HTTP/1.1 only
//! - Request bodies must be sent with `Content-Length`, chunked requests are rejected
//! - Maximum header size: 8KB, maximum number of headers: 64, maximum body size: 4MB

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
