use crate::body::ResponseBody;
use crate::responder::Responder;
use crate::RequestContext;
use http::{Response, StatusCode};
use std::string::FromUtf8Error;
use thiserror::Error;

/// Extracts a handler argument from the request context.
pub trait FromRequest: Sized {
    fn from_request(req: &mut RequestContext) -> Result<Self, ExtractError>;
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("request body has been consumed")]
    BodyConsumed,

    #[error("request body is not utf8: {source}")]
    InvalidUtf8Body {
        #[from]
        source: FromUtf8Error,
    },

    #[error("invalid query string: {source}")]
    InvalidQuery {
        #[from]
        source: serde_urlencoded::de::Error,
    },
}

impl Responder for ExtractError {
    fn response_to(self, req: &RequestContext) -> Response<ResponseBody> {
        (StatusCode::BAD_REQUEST, self.to_string()).response_to(req)
    }
}

impl<T: FromRequest> FromRequest for Option<T> {
    fn from_request(req: &mut RequestContext) -> Result<Self, ExtractError> {
        Ok(T::from_request(req).ok())
    }
}

impl<T: FromRequest> FromRequest for Result<T, ExtractError> {
    fn from_request(req: &mut RequestContext) -> Result<Self, ExtractError> {
        Ok(T::from_request(req))
    }
}
