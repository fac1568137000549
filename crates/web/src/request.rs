//! Per-request state handed through the middleware chain.
//!
//! - `RequestContext`: the request header, the buffered body and the parameters
//! - `Params`: one namespace holding query values and captured path segments

use std::collections::hash_map;
use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method, Request, Uri, Version};
use pico_http::protocol::RequestHeader;
use tracing::warn;

/// Represents the context of one HTTP request.
///
/// A context is created for every incoming request and exclusively borrowed by the
/// chain handling it. Query parameters are seeded when the context is created, path
/// parameters are merged in by the router after a route matched. Both live in the same
/// [`Params`], so a captured path segment overwrites a query value with the same name.
#[derive(Debug)]
pub struct RequestContext {
    request_header: RequestHeader,
    body: Option<Bytes>,
    params: Params,
}

impl RequestContext {
    /// Creates a new context with no parameters.
    pub fn new(request_header: RequestHeader, body: Bytes) -> Self {
        Self { request_header, body: Some(body), params: Params::new() }
    }

    /// Creates a context whose parameters are seeded from the query string of the uri.
    pub fn with_query_params(request: Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();
        let request_header = RequestHeader::from(parts);
        let params = request_header.uri().query().map(Params::from_query).unwrap_or_default();
        Self { request_header, body: Some(body), params }
    }

    /// Returns a reference to the underlying RequestHeader
    pub fn request_header(&self) -> &RequestHeader {
        &self.request_header
    }

    /// Returns the HTTP method of the request
    pub fn method(&self) -> &Method {
        self.request_header.method()
    }

    /// Returns the URI of the request
    pub fn uri(&self) -> &Uri {
        self.request_header.uri()
    }

    /// Returns the HTTP version of the request
    pub fn version(&self) -> Version {
        self.request_header.version()
    }

    /// Returns the HTTP headers of the request
    pub fn headers(&self) -> &HeaderMap {
        self.request_header.headers()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    /// Shortcut for `self.params().get(name)`
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Takes the request body, `None` once it has been taken.
    pub fn take_body(&mut self) -> Option<Bytes> {
        self.body.take()
    }
}

impl From<Request<Bytes>> for RequestContext {
    fn from(request: Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();
        Self::new(RequestHeader::from(parts), body)
    }
}

/// Named request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self { inner: HashMap::new() }
    }

    /// Parses an url encoded query string.
    ///
    /// When a key repeats, the first value is kept. A query that can't be decoded yields
    /// no parameters.
    pub fn from_query(query: &str) -> Self {
        let pairs = match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!(cause = %e, query, "ignore undecodable query string");
                return Self::new();
            }
        };

        let mut params = Self::new();
        for (key, value) in pairs {
            params.inner.entry(key).or_insert(value);
        }
        params
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Gets the value of a parameter by its name
    #[inline]
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        self.inner.get(key.as_ref()).map(String::as_str)
    }

    /// Inserts a parameter, overwriting any previous value of the same name.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Moves every parameter of `other` into `self`, values of `other` win.
    pub fn merge(&mut self, other: Params) {
        self.inner.extend(other.inner);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self { inner: iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect() }
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
