//! Generic value decoration: a `Decorator` turns one value into another one wrapping it.
//!
//! Middlewares are decorators of [`BoxedHandler`](crate::handler::BoxedHandler).

mod decorator_fn;

pub use decorator_fn::{decorator_fn, DecoratorFn};

pub trait Decorator<In> {
    type Out;

    fn decorate(&self, raw: In) -> Self::Out;
}
