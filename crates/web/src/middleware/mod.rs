//! Middlewares wrapping the request dispatch.
//!
//! A [`Middleware`] takes the next handler of the chain and returns a handler wrapping
//! it. Every [`Decorator`] of [`BoxedHandler`] producing a [`RequestHandler`] is a
//! middleware, so both decorator structs and [`decorator_fn`](crate::decorator::decorator_fn)
//! closures can be registered.
//!
//! [`MiddlewareChain::compose`] folds the list from the last middleware to the first one,
//! the first middleware added is the outermost layer: it runs first and finishes last.

mod logging;
mod recovery;

pub use logging::{LoggingDecorator, LoggingHandler};
pub use recovery::{RecoveryDecorator, RecoveryHandler};

use crate::decorator::Decorator;
use crate::handler::{BoxedHandler, RequestHandler};

pub trait Middleware: Send + Sync {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

impl<D> Middleware for D
where
    D: Decorator<BoxedHandler> + Send + Sync,
    D::Out: RequestHandler + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        Box::new(self.decorate(next))
    }
}

/// An ordered list of middlewares.
#[derive(Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Box<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self { middlewares: vec![] }
    }

    /// Appends a middleware, it will be wrapped inside every middleware added before.
    pub fn push<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Box::new(middleware));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Wraps `terminal` with every middleware, the first one ending up outermost.
    ///
    /// The returned handler is independent of the chain: middlewares pushed afterwards
    /// only affect later compositions.
    pub fn compose(&self, terminal: BoxedHandler) -> BoxedHandler {
        self.middlewares.iter().rev().fold(terminal, |next, middleware| middleware.wrap(next))
    }
}

impl std::fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareChain").field("len", &self.middlewares.len()).finish()
    }
}
