use crate::extract::from_request::{ExtractError, FromRequest};
use crate::RequestContext;

macro_rules! impl_from_request_for_tuple {
    ($($param:ident)*) => {
        impl<$($param,)*> FromRequest for ($($param,)*)
        where
            $($param: FromRequest,)*
        {
            #[allow(unused_variables)]
            fn from_request(req: &mut RequestContext) -> Result<Self, ExtractError> {
                Ok(($($param::from_request(req)?,)*))
            }
        }
    }
}

impl_from_request_for_tuple! {}
impl_from_request_for_tuple! { A }
impl_from_request_for_tuple! { A B }
impl_from_request_for_tuple! { A B C }
impl_from_request_for_tuple! { A B C D }
impl_from_request_for_tuple! { A B C D E }
impl_from_request_for_tuple! { A B C D E F }
impl_from_request_for_tuple! { A B C D E F G }
impl_from_request_for_tuple! { A B C D E F G H }
