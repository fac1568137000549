//! Fixtures shared by the benchmarks.

/// A named request fixture
#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn content(&self) -> &'static str {
        self.content
    }
}

pub static GET_SMALL: TestFile = TestFile::new(
    "get_small",
    "GET /users/42?page=1 HTTP/1.1\r\nHost: 127.0.0.1:8080\r\nAccept: */*\r\n\r\n",
);

pub static GET_LARGE: TestFile = TestFile::new(
    "get_large",
    concat!(
        "GET /api/v1/users/42/posts/1337/comments?offset=20&limit=10&sort=desc HTTP/1.1\r\n",
        "Host: 127.0.0.1:8080\r\n",
        "User-Agent: Mozilla/5.0 (X11; Linux x86_64; rv:131.0) Gecko/20100101 Firefox/131.0\r\n",
        "Accept: text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8\r\n",
        "Accept-Language: en-US,en;q=0.5\r\n",
        "Accept-Encoding: gzip, deflate, br, zstd\r\n",
        "Cookie: session=5f2b9c4e8d1a4f7b9e3c6a2d0b8f1e7c; theme=dark; lang=en\r\n",
        "Connection: keep-alive\r\n",
        "Upgrade-Insecure-Requests: 1\r\n",
        "Sec-Fetch-Dest: document\r\n",
        "Sec-Fetch-Mode: navigate\r\n",
        "Sec-Fetch-Site: none\r\n",
        "Sec-Fetch-User: ?1\r\n",
        "Priority: u=0, i\r\n",
        "\r\n",
    ),
);

pub static POST_FORM: TestFile = TestFile::new(
    "post_form",
    concat!(
        "POST /users HTTP/1.1\r\n",
        "Host: 127.0.0.1:8080\r\n",
        "Content-Type: application/x-www-form-urlencoded\r\n",
        "Content-Length: 26\r\n",
        "\r\n",
        "name=pico&email=pico@a.com",
    ),
);

/// Patterns of a typical REST api, registered in this order
pub const ROUTE_PATTERNS: &[&str] = &[
    "/",
    "/health",
    "/users",
    "/users/:id",
    "/users/:id/posts",
    "/users/:id/posts/:post_id",
    "/users/:id/posts/:post_id/comments",
    "/posts",
    "/posts/:post_id",
    "/api/v1/users/:id/posts/:post_id/comments",
];
