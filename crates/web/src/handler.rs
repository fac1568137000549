use crate::body::ResponseBody;
use crate::extract::FromRequest;
use crate::fn_trait::FnTrait;
use crate::responder::Responder;
use crate::RequestContext;
use async_trait::async_trait;
use http::Response;
use std::marker::PhantomData;
use tracing::warn;

/// Handles one request, the unit every route, middleware layer and the dispatcher are
/// made of.
///
/// Handlers never fail: errors have already been turned into a response when `invoke`
/// returns.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, req: &mut RequestContext) -> Response<ResponseBody>;
}

/// A type erased handler, as stored in the router and passed along the middleware chain.
pub type BoxedHandler = Box<dyn RequestHandler>;

#[async_trait]
impl<T> RequestHandler for Box<T>
where
    T: RequestHandler + ?Sized,
{
    async fn invoke(&self, req: &mut RequestContext) -> Response<ResponseBody> {
        (**self).invoke(req).await
    }
}

/// a `FnTrait` holder which represents any async Fn
#[derive(Debug)]
pub struct FnHandler<F, Args> {
    f: F,
    _phantom: PhantomData<fn(Args)>,
}

impl<F, Args> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    fn new(f: F) -> Self {
        Self { f, _phantom: PhantomData }
    }
}

/// Turns an async function into a [`RequestHandler`].
///
/// Every argument is extracted with [`FromRequest`], the returned value is converted
/// with [`Responder`].
pub fn handler_fn<F, Args>(f: F) -> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    FnHandler::new(f)
}

#[async_trait]
impl<F, Args> RequestHandler for FnHandler<F, Args>
where
    F: FnTrait<Args>,
    F::Output: Responder,
    Args: FromRequest + Send + 'static,
{
    async fn invoke(&self, req: &mut RequestContext) -> Response<ResponseBody> {
        let args = match Args::from_request(req) {
            Ok(args) => args,
            Err(e) => {
                warn!(cause = %e, uri = %req.uri(), "failed to extract handler arguments");
                return e.response_to(req);
            }
        };

        let responder = self.f.call(args).await;
        responder.response_to(req)
    }
}
