//! The composition root: router, middlewares and transport wired together.

use crate::body::ResponseBody;
use crate::handler::{BoxedHandler, RequestHandler};
use crate::middleware::{LoggingDecorator, Middleware, MiddlewareChain};
use crate::router::{DispatchHandler, NotFoundHandler, Router};
use crate::RequestContext;
use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use pico_http::connection::HttpConnection;
use pico_http::handler::Handler;
use std::error::Error;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Configures a [`Server`].
///
/// A new builder already carries the [`LoggingDecorator`] as its first middleware.
/// Middlewares added with [`wrap`](Self::wrap) run in the order they were added.
pub struct ServerBuilder {
    router: Option<Router>,
    default_handler: Option<BoxedHandler>,
    address: Option<io::Result<Vec<SocketAddr>>>,
    middlewares: MiddlewareChain,
}

impl ServerBuilder {
    fn new() -> Self {
        let mut middlewares = MiddlewareChain::new();
        middlewares.push(LoggingDecorator);
        Self { router: None, default_handler: None, address: None, middlewares }
    }

    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Replaces the handler answering requests no route matched, `404 Not Found` by default.
    pub fn default_handler(mut self, request_handler: impl RequestHandler + 'static) -> Self {
        self.default_handler = Some(Box::new(request_handler));
        self
    }

    /// Appends a middleware, wrapped inside every middleware added before.
    pub fn wrap<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middlewares.push(middleware);
        self
    }

    pub fn wrap_all<I>(mut self, middlewares: I) -> Self
    where
        I: IntoIterator,
        I::Item: Middleware + 'static,
    {
        for middleware in middlewares {
            self.middlewares.push(middleware);
        }
        self
    }

    /// Composes the middlewares around the router once, the result is shared by every request.
    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)??;
        if address.is_empty() {
            return Err(ServerBuildError::MissingAddress);
        }

        let not_found = self.default_handler.unwrap_or_else(|| Box::new(NotFoundHandler));
        let handler = self.middlewares.compose(Box::new(DispatchHandler::new(router, not_found)));

        Ok(Server { handler, address })
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
    #[error("invalid address: {source}")]
    InvalidAddress {
        #[from]
        source: io::Error,
    },
}

pub struct Server {
    handler: BoxedHandler,
    address: Vec<SocketAddr>,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub fn address(&self) -> &[SocketAddr] {
        &self.address
    }

    /// Runs one request through the middleware chain and the router.
    ///
    /// The request context is seeded with the query parameters, path parameters of the
    /// matched route are merged in afterwards.
    pub async fn serve(&self, request: Request<Bytes>) -> Response<ResponseBody> {
        let mut req = RequestContext::with_query_params(request);
        self.handler.invoke(&mut req).await
    }

    /// Binds the configured address and serves connections until the process ends.
    ///
    /// Returns the error when the address can't be bound.
    ///
    /// A panic escaping the handlers aborts the task of its connection, register the
    /// [`RecoveryDecorator`](crate::middleware::RecoveryDecorator) to answer `500` instead.
    pub async fn start(self) -> io::Result<()> {
        let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            debug!(cause = %e, "global subscriber already set");
        }

        info!("start listening at {:?}", self.address);
        let tcp_listener = match TcpListener::bind(self.address.as_slice()).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return Err(e);
            }
        };

        let handler = Arc::new(self);
        loop {
            let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let handler = Arc::clone(&handler);

            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                let connection = HttpConnection::new(reader, writer);
                match connection.process(handler).await {
                    Ok(()) => {
                        info!("finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!("service has error, cause {}, connection shutdown", e);
                    }
                }
            });
        }
    }
}

impl std::fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerBuilder")
            .field("router", &self.router)
            .field("address", &self.address)
            .field("has_default_handler", &self.default_handler.is_some())
            .field("middlewares", &self.middlewares)
            .finish()
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server").field("address", &self.address).finish_non_exhaustive()
    }
}

#[async_trait]
impl Handler for Server {
    type RespBody = ResponseBody;
    type Error = Box<dyn Error + Send + Sync>;

    async fn call(&self, req: Request<Bytes>) -> Result<Response<Self::RespBody>, Self::Error> {
        Ok(self.serve(req).await)
    }
}
