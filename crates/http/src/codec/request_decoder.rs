//! HTTP request decoder.
//!
//! The decoder works in two phases: the request head is parsed with `httparse`,
//! then the body announced by `Content-Length` is buffered until it is complete.
//! Only complete requests are yielded, so a handler always sees the whole body.
//!
//! # Example
//!
//! ```no_run
//! use pico_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from("GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
//! let request = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.uri().path(), "/");
//! ```

use std::mem;

use bytes::{Buf, Bytes, BytesMut};
use http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};
use http::Request;
use httparse::{Error, Status};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;
use crate::protocol::{ParseError, RequestHeader};

/// Maximum number of headers allowed in a request
const MAX_HEADER_NUM: usize = 64;

/// Maximum size in bytes allowed for the entire header section
const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Maximum size in bytes allowed for a request body
const MAX_BODY_BYTES: u64 = 4 * 1024 * 1024;

/// A decoder producing complete `Request<Bytes>` values.
///
/// # State Machine
///
/// - `Head`: waiting for a complete request head
/// - `Body`: head parsed, waiting for `length` body bytes
#[derive(Debug)]
pub struct RequestDecoder {
    state: DecodeState,
}

#[derive(Debug)]
enum DecodeState {
    Head,
    Body { header: RequestHeader, length: usize },
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self { state: DecodeState::Head }
    }
}

impl Decoder for RequestDecoder {
    type Item = Request<Bytes>;
    type Error = ParseError;

    /// Attempts to decode a complete request from the buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: head and body are both complete
    /// - `Ok(None)`: need more data to proceed
    /// - `Err(_)`: the request is malformed or exceeds a limit
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match mem::replace(&mut self.state, DecodeState::Head) {
                DecodeState::Head => match decode_head(src)? {
                    Some((header, length)) => self.state = DecodeState::Body { header, length },
                    None => return Ok(None),
                },

                DecodeState::Body { header, length } => {
                    if src.len() < length {
                        src.reserve(length - src.len());
                        self.state = DecodeState::Body { header, length };
                        return Ok(None);
                    }

                    let body = src.split_to(length).freeze();
                    return Ok(Some(header.body(body)));
                }
            }
        }
    }
}

fn decode_head(src: &mut BytesMut) -> Result<Option<(RequestHeader, usize)>, ParseError> {
    if src.is_empty() {
        return Ok(None);
    }

    let (header, body_offset) = {
        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_NUM];
        let mut req = httparse::Request::new(&mut headers);

        let status = req.parse(&src[..]).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(MAX_HEADER_NUM),
            e => ParseError::invalid_header(e.to_string()),
        })?;

        match status {
            Status::Partial => {
                ensure!(src.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(src.len(), MAX_HEADER_BYTES));
                return Ok(None);
            }
            Status::Complete(body_offset) => {
                trace!(header_size = body_offset, "parsed request head");
                ensure!(body_offset <= MAX_HEADER_BYTES, ParseError::too_large_header(body_offset, MAX_HEADER_BYTES));
                (RequestHeader::try_from(req)?, body_offset)
            }
        }
    };

    src.advance(body_offset);

    let length = parse_content_length(&header)?;
    Ok(Some((header, length)))
}

fn parse_content_length(header: &RequestHeader) -> Result<usize, ParseError> {
    if let Some(encoding) = header.headers().get(TRANSFER_ENCODING) {
        let encoding = encoding.to_str().unwrap_or("<non-ascii>");
        return Err(ParseError::unsupported_transfer_encoding(encoding));
    }

    let mut values = header.headers().get_all(CONTENT_LENGTH).iter();
    let Some(value) = values.next() else {
        return Ok(0);
    };
    ensure!(values.next().is_none(), ParseError::invalid_content_length("multiple content-length headers"));

    let length = value
        .to_str()
        .map_err(ParseError::invalid_content_length)?
        .trim()
        .parse::<u64>()
        .map_err(ParseError::invalid_content_length)?;

    ensure!(length <= MAX_BODY_BYTES, ParseError::too_large_body(length, MAX_BODY_BYTES));

    usize::try_from(length).map_err(ParseError::invalid_content_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn decode_get_without_body() {
        let mut buffer = BytesMut::from("GET /api/posts/231?page=2 HTTP/1.1\r\nHost: localhost\r\n\r\n");
        let mut decoder = RequestDecoder::new();

        let request = decoder.decode(&mut buffer).unwrap().unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.uri().path(), "/api/posts/231");
        assert_eq!(request.uri().query(), Some("page=2"));
        assert!(request.body().is_empty());
        assert!(buffer.is_empty());
    }

    #[test]
    fn decode_body_in_pieces() {
        let mut buffer = BytesMut::from("POST /users HTTP/1.1\r\nContent-Length: 11\r\n\r\nhello");
        let mut decoder = RequestDecoder::new();

        assert!(decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(b" world");
        let request = decoder.decode(&mut buffer).unwrap().unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(&request.body()[..], b"hello world");
    }

    #[test]
    fn decode_pipelined_requests() {
        let mut buffer = BytesMut::from("GET /a HTTP/1.1\r\n\r\nGET /b HTTP/1.1\r\n\r\n");
        let mut decoder = RequestDecoder::new();

        let first = decoder.decode(&mut buffer).unwrap().unwrap();
        let second = decoder.decode(&mut buffer).unwrap().unwrap();

        assert_eq!(first.uri().path(), "/a");
        assert_eq!(second.uri().path(), "/b");
        assert!(decoder.decode(&mut buffer).unwrap().is_none());
    }

    #[test]
    fn partial_head_waits() {
        let mut buffer = BytesMut::from("GET /index HTTP/1.1\r\nHost: loc");
        let mut decoder = RequestDecoder::new();

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
    }

    #[test]
    fn reject_chunked_body() {
        let mut buffer = BytesMut::from("POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n");
        let mut decoder = RequestDecoder::new();

        let result = decoder.decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::UnsupportedTransferEncoding { .. })));
    }

    #[test]
    fn reject_invalid_content_length() {
        let mut buffer = BytesMut::from("POST / HTTP/1.1\r\nContent-Length: abc\r\n\r\n");
        let mut decoder = RequestDecoder::new();

        let result = decoder.decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::InvalidContentLength { .. })));
    }

    #[test]
    fn reject_too_large_body() {
        let mut buffer = BytesMut::from("POST / HTTP/1.1\r\nContent-Length: 99999999999\r\n\r\n");
        let mut decoder = RequestDecoder::new();

        let result = decoder.decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::TooLargeBody { .. })));
    }

    #[test]
    fn reject_too_large_header() {
        let mut raw = String::from("GET / HTTP/1.1\r\nX-Padding: ");
        raw.push_str(&"a".repeat(MAX_HEADER_BYTES));
        let mut buffer = BytesMut::from(raw.as_str());
        let mut decoder = RequestDecoder::new();

        let result = decoder.decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::TooLargeHeader { .. })));
    }
}
