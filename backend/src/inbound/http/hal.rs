//! `Hal<M>` responder: runs the response pipeline and writes HAL JSON.
//!
//! Handlers return `Hal<EntityModel>` or `Hal<PagedModel>`. The responder looks
//! up the [`ResponsePipeline`] registered as application data, identifies the
//! handler by method and matched route pattern, and decorates the body before
//! serialising it as `application/hal+json`. Without a registered pipeline
//! the body is written undecorated.

use actix_web::body::BoxBody;
use actix_web::{HttpRequest, HttpResponse, Responder, ResponseError, web};
use tracing::warn;

use crate::domain::{
    DescribeType, Error, HandlerId, ResponseBody, ResponsePipeline, TypeDescriptor, TypeName,
};

/// Media type of HAL documents.
pub const HAL_JSON: &str = "application/hal+json";

/// Response wrapper marking a model for hypermedia decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct Hal<M>(pub M);

impl<M> Hal<M> {
    /// Unwrap the model.
    pub fn into_inner(self) -> M {
        self.0
    }
}

impl<M: DescribeType> DescribeType for Hal<M> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::parameterized(TypeName::HAL, vec![M::type_descriptor()])
    }
}

/// Handler identity for `req`, falling back to the raw path for unmatched
/// requests.
pub fn handler_id(req: &HttpRequest) -> HandlerId {
    let pattern = req
        .match_pattern()
        .unwrap_or_else(|| req.path().to_owned());
    HandlerId::new(req.method().as_str(), pattern)
}

impl<M> Responder for Hal<M>
where
    M: DescribeType + Into<ResponseBody>,
{
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        let return_type = Self::type_descriptor();
        let body: ResponseBody = self.0.into();
        let body = match req.app_data::<web::Data<ResponsePipeline>>() {
            Some(pipeline) => {
                match pipeline.before_body_write(&handler_id(req), &return_type, body) {
                    Ok(body) => body,
                    Err(err) => return Error::from(err).error_response(),
                }
            }
            None => {
                warn!(%return_type, "no response pipeline registered; writing undecorated body");
                body
            }
        };
        HttpResponse::Ok().content_type(HAL_JSON).json(body)
    }
}
