//! A minimal HTTP dispatch layer on top of `pico-http`.
//!
//! Handlers are registered per method and path pattern on a [`Router`]. Patterns are
//! made of literal segments and `:name` captures, see [`matcher`]. The [`Server`]
//! wraps the router with an ordered list of middlewares once and runs every request
//! through the result.
//!
//! # Example
//!
//! ```no_run
//! use pico_web::middleware::RecoveryDecorator;
//! use pico_web::{handler_fn, Params, Router, Server};
//!
//! async fn user(params: Params) -> String {
//!     format!("user {}", params.get("id").unwrap_or_default())
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = Router::builder().get("/users/:id", handler_fn(user)).build();
//!
//!     Server::builder()
//!         .router(router)
//!         .address("127.0.0.1:8080")
//!         .wrap(RecoveryDecorator)
//!         .build()
//!         .unwrap()
//!         .start()
//!         .await
//!         .unwrap();
//! }
//! ```

mod body;
mod fn_trait;
mod handler;
mod request;
mod responder;
mod server;

#[cfg(test)]
mod test_utils;

pub mod decorator;
pub mod extract;
pub mod matcher;
pub mod middleware;
pub mod router;

pub use body::ResponseBody;
pub use fn_trait::FnTrait;
pub use handler::{handler_fn, BoxedHandler, FnHandler, RequestHandler};
pub use request::{Params, RequestContext};
pub use responder::Responder;
pub use router::Router;
pub use server::{Server, ServerBuildError, ServerBuilder};
