//! Typed extraction of handler arguments from a [`RequestContext`](crate::RequestContext).
//!
//! Every argument of a function wrapped by [`handler_fn`](crate::handler_fn) implements
//! [`FromRequest`]. When one of them fails, the handler is not called and the
//! [`ExtractError`] is answered instead.

mod extract_body;
mod extract_header;
mod extract_tuple;
mod extract_url;
mod from_request;

pub use from_request::ExtractError;
pub use from_request::FromRequest;

/// Represented as url query data
///
/// when request with url query, we can using this struct to inject data,
/// note: the struct must impl [`serde::Deserialize`]
///
/// # Example
/// ```
/// # use serde::Deserialize;
/// # use pico_web::extract::Query;
/// # #[allow(dead_code)]
/// #[derive(Deserialize, Debug)]
/// struct Page {
///     offset: u32,
///     limit: u32,
/// }
///
/// pub async fn handle(Query(page): Query<Page>) -> String {
///     format!("received page: {:?}", page)
/// }
/// ```
#[derive(Debug)]
pub struct Query<T>(pub T);
