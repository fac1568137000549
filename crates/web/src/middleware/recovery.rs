use crate::body::ResponseBody;
use crate::decorator::Decorator;
use crate::handler::RequestHandler;
use crate::responder::Responder;
use crate::RequestContext;
use async_trait::async_trait;
use futures::FutureExt;
use http::{Response, StatusCode};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::error;

/// Turns a panic of the inner handler into a `500 Internal Server Error` response.
///
/// Only the status text is sent to the client, the panic message is logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecoveryDecorator;

#[derive(Debug)]
pub struct RecoveryHandler<H> {
    handler: H,
}

impl<H: RequestHandler> Decorator<H> for RecoveryDecorator {
    type Out = RecoveryHandler<H>;

    fn decorate(&self, raw: H) -> Self::Out {
        RecoveryHandler { handler: raw }
    }
}

#[async_trait]
impl<H: RequestHandler> RequestHandler for RecoveryHandler<H> {
    async fn invoke(&self, req: &mut RequestContext) -> Response<ResponseBody> {
        match AssertUnwindSafe(self.handler.invoke(req)).catch_unwind().await {
            Ok(response) => response,
            Err(panic) => {
                error!(cause = panic_message(&*panic), uri = %req.uri(), "handler panicked");
                StatusCode::INTERNAL_SERVER_ERROR.response_to(req)
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler_fn;
    use bytes::Bytes;
    use http::Request;
    use http_body_util::BodyExt;

    fn ctx() -> RequestContext {
        RequestContext::from(Request::builder().uri("/boom").body(Bytes::new()).unwrap())
    }

    #[tokio::test]
    async fn panic_becomes_internal_server_error() {
        async fn boom() -> &'static str {
            panic!("boom")
        }

        let handler = RecoveryDecorator.decorate(handler_fn(boom));
        let response = handler.invoke(&mut ctx()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, Bytes::from_static(b"Internal Server Error"));
    }

    #[tokio::test]
    async fn normal_response_untouched() {
        async fn fine() -> &'static str {
            "fine"
        }

        let handler = RecoveryDecorator.decorate(handler_fn(fine));
        let response = handler.invoke(&mut ctx()).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn message_of_formatted_panic() {
        let panic: Box<dyn Any + Send> = Box::new(format!("index {} out of range", 3));

        assert_eq!(panic_message(&*panic), "index 3 out of range");
    }
}
