use crate::body::ResponseBody;
use crate::handler::{BoxedHandler, RequestHandler};
use crate::responder::Responder;
use crate::router::{Dispatch, Router};
use crate::RequestContext;
use async_trait::async_trait;
use http::{Response, StatusCode};
use percent_encoding::percent_decode_str;
use std::fmt;
use tracing::warn;

/// The innermost layer of the middleware chain.
///
/// Dispatches the request through the router, merges the captured path parameters into
/// the context and invokes the matched handler. Requests without a matching route go to
/// the not found handler.
///
/// The path is percent-decoded before matching, so captures hold decoded values like
/// the query parameters do. A path that does not decode to utf8 is answered with
/// `400 Bad Request`.
pub struct DispatchHandler {
    router: Router,
    not_found: BoxedHandler,
}

impl DispatchHandler {
    pub fn new(router: Router, not_found: BoxedHandler) -> Self {
        Self { router, not_found }
    }
}

#[async_trait]
impl RequestHandler for DispatchHandler {
    async fn invoke(&self, req: &mut RequestContext) -> Response<ResponseBody> {
        let dispatch = {
            let path = match percent_decode_str(req.uri().path()).decode_utf8() {
                Ok(path) => path,
                Err(e) => {
                    warn!(cause = %e, uri = %req.uri(), "path is not utf8 after percent-decoding");
                    return StatusCode::BAD_REQUEST.response_to(req);
                }
            };
            self.router.dispatch(req.method(), &path)
        };
        match dispatch {
            Dispatch::Found { handler, params } => {
                // path captures overwrite query values of the same name
                req.params_mut().merge(params);
                handler.invoke(req).await
            }
            Dispatch::NotFound => self.not_found.invoke(req).await,
        }
    }
}

impl fmt::Debug for DispatchHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchHandler").field("router", &self.router).finish_non_exhaustive()
    }
}

/// Answers `404 Not Found`
#[derive(Debug, Default, Clone, Copy)]
pub struct NotFoundHandler;

#[async_trait]
impl RequestHandler for NotFoundHandler {
    async fn invoke(&self, req: &mut RequestContext) -> Response<ResponseBody> {
        StatusCode::NOT_FOUND.response_to(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{handler_fn, Params};
    use bytes::Bytes;
    use http::{Method, Request};
    use http_body_util::BodyExt;

    async fn user(params: Params) -> String {
        params.get("id").unwrap_or_default().to_owned()
    }

    async fn greet(params: Params) -> String {
        format!("{}|{}", params.get("id").unwrap_or_default(), params.get("name").unwrap_or_default())
    }

    fn dispatcher() -> DispatchHandler {
        let router = Router::builder()
            .get("/users/:id", handler_fn(user))
            .get("/greet/:id", handler_fn(greet))
            .get("/hello world", handler_fn(|| async { "hello" }))
            .build();
        DispatchHandler::new(router, Box::new(NotFoundHandler))
    }

    async fn invoke(handler: &DispatchHandler, method: Method, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().method(method).uri(uri).body(Bytes::new()).unwrap();
        let mut req = RequestContext::with_query_params(request);
        let response = handler.invoke(&mut req).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn path_param_overwrites_query() {
        let (status, body) = invoke(&dispatcher(), Method::GET, "/users/42?id=99").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");
    }

    #[tokio::test]
    async fn unmatched_is_not_found() {
        let handler = dispatcher();

        assert_eq!(invoke(&handler, Method::GET, "/posts/1").await, (StatusCode::NOT_FOUND, "Not Found".to_owned()));
        assert_eq!(invoke(&handler, Method::POST, "/users/42").await, (StatusCode::NOT_FOUND, "Not Found".to_owned()));
    }

    #[tokio::test]
    async fn capture_is_percent_decoded() {
        let (status, body) = invoke(&dispatcher(), Method::GET, "/greet/a%20b?name=a%20b").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "a b|a b");
    }

    #[tokio::test]
    async fn literal_route_matches_encoded_path() {
        let (status, body) = invoke(&dispatcher(), Method::GET, "/hello%20world").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn encoded_slash_splits_segments() {
        let (status, body) = invoke(&dispatcher(), Method::GET, "/users/a%2Fb").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not Found");
    }

    #[tokio::test]
    async fn invalid_utf8_path_is_bad_request() {
        let (status, _) = invoke(&dispatcher(), Method::GET, "/users/%FF").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn debug_shows_router() {
        assert!(format!("{:?}", dispatcher()).contains("/hello world"));
    }
}
