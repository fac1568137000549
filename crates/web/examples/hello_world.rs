use pico_web::{handler_fn, Router, Server};

async fn hello_world() -> &'static str {
    "hello world"
}

// curl -v http://127.0.0.1:8080/
#[tokio::main]
async fn main() {
    let router = Router::builder().get("/", handler_fn(hello_world)).build();

    Server::builder().router(router).address("127.0.0.1:8080").build().unwrap().start().await.unwrap();
}
