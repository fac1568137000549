use crate::body::ResponseBody;
use crate::decorator::Decorator;
use crate::handler::RequestHandler;
use crate::RequestContext;
use async_trait::async_trait;
use http::Response;
use std::time::Instant;
use tracing::info;

/// Logs the method, the full uri and the elapsed time of every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingDecorator;

#[derive(Debug)]
pub struct LoggingHandler<H> {
    handler: H,
}

impl<H: RequestHandler> Decorator<H> for LoggingDecorator {
    type Out = LoggingHandler<H>;

    fn decorate(&self, raw: H) -> Self::Out {
        LoggingHandler { handler: raw }
    }
}

#[async_trait]
impl<H: RequestHandler> RequestHandler for LoggingHandler<H> {
    async fn invoke(&self, req: &mut RequestContext) -> Response<ResponseBody> {
        let start = Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let response = self.handler.invoke(req).await;

        info!(%method, %uri, status = response.status().as_u16(), elapsed = ?start.elapsed(), "request handled");
        response
    }
}
