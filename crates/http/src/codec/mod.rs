//! HTTP codec module for encoding and decoding HTTP messages
//!
//! - [`RequestDecoder`]: decodes complete requests (head + `Content-Length` body)
//! - [`ResponseEncoder`]: encodes buffered responses
//!
//! # Example
//!
//! ```no_run
//! use pico_http::codec::{RequestDecoder, ResponseEncoder};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::{Bytes, BytesMut};
//! use http::Response;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut request_buffer = BytesMut::new();
//! let request = decoder.decode(&mut request_buffer);
//!
//! let mut encoder = ResponseEncoder::new();
//! let mut response_buffer = BytesMut::new();
//! encoder.encode(Response::new(Bytes::from_static(b"ok")), &mut response_buffer).unwrap();
//! ```

mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
