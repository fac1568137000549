//! Route registration and dispatch.
//!
//! Routes are kept per method in registration order. Dispatching a request walks the
//! routes of its method and picks the first pattern matching the path, so overlapping
//! patterns resolve to the one registered first.

mod dispatcher;

pub use dispatcher::{DispatchHandler, NotFoundHandler};

use crate::handler::{BoxedHandler, RequestHandler};
use crate::matcher::match_path;
use crate::Params;
use http::Method;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Handlers keyed by method and path pattern.
pub struct Router {
    routes: HashMap<Method, Vec<Route>>,
}

/// A registered pattern with its handler
pub struct Route {
    pattern: String,
    handler: BoxedHandler,
}

/// Result of dispatching a method and a path
pub enum Dispatch<'router> {
    Found { handler: &'router dyn RequestHandler, params: Params },
    NotFound,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Finds the handler for `method` and `path`.
    ///
    /// Only routes of the request method are considered, an unknown method yields
    /// [`Dispatch::NotFound`] right away.
    pub fn dispatch<'router>(&'router self, method: &Method, path: &str) -> Dispatch<'router> {
        let Some(routes) = self.routes.get(method) else {
            trace!(%method, path, "no route registered for method");
            return Dispatch::NotFound;
        };

        for route in routes {
            if let Some(params) = match_path(&route.pattern, path) {
                return Dispatch::Found { handler: route.handler.as_ref(), params };
            }
        }

        trace!(%method, path, "no route matched");
        Dispatch::NotFound
    }

    /// Routes registered for `method`, in dispatch order.
    pub fn routes(&self, method: &Method) -> impl Iterator<Item = &Route> {
        self.routes.get(method).into_iter().flatten()
    }

    /// Number of registered routes across all methods
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Route {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn handler(&self) -> &dyn RequestHandler {
        self.handler.as_ref()
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route").field("pattern", &self.pattern).finish_non_exhaustive()
    }
}

impl std::fmt::Debug for Dispatch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dispatch::Found { params, .. } => f.debug_struct("Found").field("params", params).finish_non_exhaustive(),
            Dispatch::NotFound => f.write_str("NotFound"),
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (method, routes) in &self.routes {
            map.entry(method, &routes.iter().map(Route::pattern).collect::<Vec<_>>());
        }
        map.finish()
    }
}

#[derive(Default)]
pub struct RouterBuilder {
    routes: HashMap<Method, Vec<Route>>,
}

impl std::fmt::Debug for RouterBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterBuilder").field("routes", &self.routes).finish()
    }
}

macro_rules! method_route {
    ($method_fn:ident, $method:ident) => {
        #[doc = concat!("Registers a handler for `", stringify!($method), "` requests matching `pattern`.")]
        pub fn $method_fn<H: RequestHandler + 'static>(self, pattern: impl Into<String>, handler: H) -> Self {
            self.route(Method::$method, pattern, handler)
        }
    };
}

impl RouterBuilder {
    fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Registers `handler` for `method` and `pattern`.
    ///
    /// Registering the same method and pattern again replaces the previous handler, the
    /// route keeps its original position.
    pub fn route<H: RequestHandler + 'static>(mut self, method: Method, pattern: impl Into<String>, handler: H) -> Self {
        let pattern = pattern.into();
        let handler: BoxedHandler = Box::new(handler);
        let routes = self.routes.entry(method).or_default();

        match routes.iter_mut().find(|route| route.pattern == pattern) {
            Some(route) => route.handler = handler,
            None => routes.push(Route { pattern, handler }),
        }
        self
    }

    method_route!(get, GET);
    method_route!(post, POST);
    method_route!(put, PUT);
    method_route!(delete, DELETE);
    method_route!(head, HEAD);
    method_route!(options, OPTIONS);
    method_route!(connect, CONNECT);
    method_route!(patch, PATCH);
    method_route!(trace, TRACE);

    pub fn build(self) -> Router {
        for (method, routes) in &self.routes {
            for route in routes {
                debug!(%method, pattern = route.pattern.as_str(), "route registered");
            }
        }
        Router { routes: self.routes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{handler_fn, RequestContext};
    use bytes::Bytes;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;

    async fn call(dispatch: Dispatch<'_>) -> String {
        let Dispatch::Found { handler, .. } = dispatch else {
            panic!("route not found");
        };
        let mut req = RequestContext::from(Request::builder().uri("/").body(Bytes::new()).unwrap());
        let response = handler.invoke(&mut req).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn empty_router_never_matches() {
        let router = Router::builder().build();

        assert!(router.is_empty());
        assert!(matches!(router.dispatch(&Method::GET, "/"), Dispatch::NotFound));
        assert!(matches!(router.dispatch(&Method::POST, "/users/42"), Dispatch::NotFound));
    }

    #[test]
    fn unknown_method_is_not_found() {
        let router = Router::builder().get("/users/:id", handler_fn(|| async { "user" })).build();

        assert!(matches!(router.dispatch(&Method::DELETE, "/users/42"), Dispatch::NotFound));
    }

    #[test]
    fn found_with_params() {
        let router = Router::builder().get("/users/:id", handler_fn(|| async { "user" })).build();

        match router.dispatch(&Method::GET, "/users/42") {
            Dispatch::Found { params, .. } => assert_eq!(params.get("id"), Some("42")),
            Dispatch::NotFound => panic!("route not found"),
        }
        assert!(matches!(router.dispatch(&Method::GET, "/users"), Dispatch::NotFound));
    }

    #[tokio::test]
    async fn same_route_overwrites() {
        let router = Router::builder()
            .get("/a", handler_fn(|| async { "first" }))
            .get("/b", handler_fn(|| async { "b" }))
            .get("/a", handler_fn(|| async { "second" }))
            .build();

        assert_eq!(router.len(), 2);
        assert_eq!(call(router.dispatch(&Method::GET, "/a")).await, "second");
    }

    #[tokio::test]
    async fn first_registered_wins() {
        let router = Router::builder()
            .get("/users/:id", handler_fn(|| async { "by id" }))
            .get("/users/me", handler_fn(|| async { "me" }))
            .get("/users/:name", handler_fn(|| async { "by name" }))
            .build();

        assert_eq!(call(router.dispatch(&Method::GET, "/users/me")).await, "by id");
        assert_eq!(call(router.dispatch(&Method::GET, "/users/7")).await, "by id");
    }

    #[tokio::test]
    async fn methods_are_separated() {
        let router = Router::builder()
            .get("/items", handler_fn(|| async { "list" }))
            .post("/items", handler_fn(|| async { "create" }))
            .route(Method::from_bytes(b"PURGE").unwrap(), "/items", handler_fn(|| async { "purge" }))
            .build();

        assert_eq!(router.len(), 3);
        assert_eq!(call(router.dispatch(&Method::GET, "/items")).await, "list");
        assert_eq!(call(router.dispatch(&Method::POST, "/items")).await, "create");
        assert_eq!(call(router.dispatch(&Method::from_bytes(b"PURGE").unwrap(), "/items")).await, "purge");
    }

    #[tokio::test]
    async fn routes_in_dispatch_order() {
        let router = Router::builder()
            .get("/users/:id", handler_fn(|| async { "by id" }))
            .post("/users", handler_fn(|| async { "create" }))
            .get("/users", handler_fn(|| async { "list" }))
            .get("/users/:id", handler_fn(|| async { "replaced" }))
            .build();

        let patterns: Vec<&str> = router.routes(&Method::GET).map(Route::pattern).collect();
        assert_eq!(patterns, ["/users/:id", "/users"]);
        assert_eq!(router.routes(&Method::DELETE).count(), 0);

        let route = router.routes(&Method::GET).next().unwrap();
        let mut req = RequestContext::from(Request::builder().uri("/users/1").body(Bytes::new()).unwrap());
        let bytes = route.handler().invoke(&mut req).await.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes, Bytes::from_static(b"replaced"));
    }

    #[test]
    fn debug_shows_patterns() {
        let builder = Router::builder().get("/users/:id", handler_fn(|| async { "user" }));
        assert!(format!("{builder:?}").contains("/users/:id"));

        let router = builder.build();
        assert_eq!(format!("{:?}", router.dispatch(&Method::GET, "/nothing")), "NotFound");
        assert!(format!("{:?}", router.dispatch(&Method::GET, "/users/1")).starts_with("Found"));
        assert!(format!("{:?}", router.routes(&Method::GET).next().unwrap()).contains("/users/:id"));
    }
}
