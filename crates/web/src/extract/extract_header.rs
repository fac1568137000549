use crate::extract::from_request::{ExtractError, FromRequest};
use crate::RequestContext;
use http::{HeaderMap, Method, Uri};

impl FromRequest for Method {
    fn from_request(req: &mut RequestContext) -> Result<Self, ExtractError> {
        Ok(req.method().clone())
    }
}

impl FromRequest for Uri {
    fn from_request(req: &mut RequestContext) -> Result<Self, ExtractError> {
        Ok(req.uri().clone())
    }
}

impl FromRequest for HeaderMap {
    fn from_request(req: &mut RequestContext) -> Result<Self, ExtractError> {
        Ok(req.headers().clone())
    }
}
