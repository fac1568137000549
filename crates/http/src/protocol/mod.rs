//! Protocol types shared by the codec and the connection.
//!
//! - [`RequestHeader`]: the parsed head of a request, before a body is attached
//! - [`HttpError`], [`ParseError`], [`SendError`]: the error taxonomy of a connection

mod request;
pub use request::RequestHeader;
pub(crate) use request::is_keep_alive;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
