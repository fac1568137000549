use crate::extract::from_request::{ExtractError, FromRequest};
use crate::RequestContext;
use bytes::Bytes;

/// Takes the buffered body, a second body extractor in the same handler fails.
impl FromRequest for Bytes {
    fn from_request(req: &mut RequestContext) -> Result<Self, ExtractError> {
        req.take_body().ok_or(ExtractError::BodyConsumed)
    }
}

impl FromRequest for String {
    fn from_request(req: &mut RequestContext) -> Result<Self, ExtractError> {
        let bytes = Bytes::from_request(req)?;
        // todo: honour the charset of content-type instead of assuming utf8
        Ok(String::from_utf8(bytes.into())?)
    }
}
