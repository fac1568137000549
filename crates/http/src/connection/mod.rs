//! HTTP connection handling module
//!
//! [`HttpConnection`] drives one client connection: it decodes requests, hands each of
//! them to a [`Handler`](crate::handler::Handler), writes the response and honours
//! keep-alive.

mod http_connection;

pub use http_connection::HttpConnection;
