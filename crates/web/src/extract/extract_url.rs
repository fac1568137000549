//! URL derived extraction: the merged [`Params`] and typed [`Query`] values.

use crate::extract::from_request::{ExtractError, FromRequest};
use crate::extract::Query;
use crate::{Params, RequestContext};
use serde::Deserialize;

/// Clones every parameter of the request, query values and path captures together.
impl FromRequest for Params {
    fn from_request(req: &mut RequestContext) -> Result<Self, ExtractError> {
        Ok(req.params().clone())
    }
}

/// Deserializes the raw query string with `serde_urlencoded`, a missing query is
/// treated as an empty one.
impl<T> FromRequest for Query<T>
where
    T: for<'de> Deserialize<'de>,
{
    fn from_request(req: &mut RequestContext) -> Result<Self, ExtractError> {
        let query = req.uri().query().unwrap_or_default();
        Ok(Query(serde_urlencoded::from_str::<T>(query)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{Method, Request};
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Page {
        offset: u32,
        limit: Option<u32>,
    }

    fn ctx(uri: &str, body: &'static str) -> RequestContext {
        let request = Request::builder().method(Method::POST).uri(uri).body(Bytes::from_static(body.as_bytes())).unwrap();
        RequestContext::with_query_params(request)
    }

    #[test]
    fn extract_query() {
        let mut req = ctx("/items?offset=10&limit=5", "");

        let Query(page) = Query::<Page>::from_request(&mut req).unwrap();

        assert_eq!(page, Page { offset: 10, limit: Some(5) });
    }

    #[test]
    fn extract_invalid_query() {
        let mut req = ctx("/items?offset=abc", "");

        let result = Query::<Page>::from_request(&mut req);

        assert!(matches!(result, Err(ExtractError::InvalidQuery { .. })));
    }

    #[test]
    fn extract_tuple_in_order() {
        let mut req = ctx("/items?offset=1", "hello");

        let (method, params, body) = <(Method, Params, String)>::from_request(&mut req).unwrap();

        assert_eq!(method, Method::POST);
        assert_eq!(params.get("offset"), Some("1"));
        assert_eq!(body, "hello");
    }

    #[test]
    fn body_extracted_once() {
        let mut req = ctx("/", "hello");

        let (first, second) = <(Bytes, Option<Bytes>)>::from_request(&mut req).unwrap();

        assert_eq!(first, Bytes::from_static(b"hello"));
        assert!(second.is_none());
        assert!(matches!(String::from_request(&mut req), Err(ExtractError::BodyConsumed)));
    }
}
