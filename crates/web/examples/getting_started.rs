use bytes::Bytes;
use http::{Method, StatusCode};
use pico_web::decorator::decorator_fn;
use pico_web::extract::Query;
use pico_web::middleware::RecoveryDecorator;
use pico_web::{handler_fn, BoxedHandler, Params, Router, Server};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Page {
    offset: Option<u32>,
    limit: Option<u32>,
}

// curl -v "http://127.0.0.1:8080/users/42?id=99"
// the captured `id` wins over the query value
async fn get_user(params: Params) -> String {
    format!("user {}\r\n", params.get("id").unwrap_or_default())
}

// curl -v "http://127.0.0.1:8080/users/42/posts?offset=10&limit=5"
async fn list_posts(params: Params, Query(page): Query<Page>) -> String {
    let offset = page.offset.unwrap_or(0);
    let limit = page.limit.unwrap_or(20);
    format!("posts of user {}, offset: {offset}, limit: {limit}\r\n", params.get("id").unwrap_or_default())
}

// curl -v -d "name=pico" http://127.0.0.1:8080/users
async fn create_user(method: Method, body: Option<Bytes>) -> (StatusCode, String) {
    let size = body.map_or(0, |body| body.len());
    (StatusCode::CREATED, format!("receive from method: {method}, body size: {size}\r\n"))
}

// curl -v http://127.0.0.1:8080/panic
async fn panic_handler() -> &'static str {
    panic!("something went wrong")
}

async fn default_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 not found\r\n")
}

#[tokio::main]
async fn main() {
    let router = Router::builder()
        .get("/users/:id", handler_fn(get_user))
        .get("/users/:id/posts", handler_fn(list_posts))
        .post("/users", handler_fn(create_user))
        .get("/panic", handler_fn(panic_handler))
        .build();

    // a middleware from a closure, it only passes requests through
    let passthrough = decorator_fn(|next: BoxedHandler| next);

    Server::builder()
        .router(router)
        .address("127.0.0.1:8080")
        .wrap(RecoveryDecorator)
        .wrap(passthrough)
        .default_handler(handler_fn(default_handler))
        .build()
        .unwrap()
        .start()
        .await
        .unwrap();
}
