//! Domain primitives, ports and the response decoration core.
//!
//! Purpose: model hypermedia responses independently of the HTTP framework and
//! decide how they are decorated with projections and links. Adapters live in
//! `inbound` and `outbound`; nothing here performs I/O.
//!
//! Public surface:
//! - Representation models: [`EntityModel`], [`PagedModel`], [`Content`],
//!   [`Link`] and [`Links`].
//! - Decoration: [`ReturnTypeMatcher`], [`EntityModelConverter`], the
//!   linkers and the [`ResponsePipeline`] running them.
//! - Security meta queries: [`SecurityEvaluator`] and its factory.
//! - Errors: [`Error`], [`ConfigurationError`], [`StartupError`].

pub mod converter;
pub mod error;
pub mod link;
pub mod linkers;
pub mod model;
pub mod pipeline;
pub mod ports;
pub mod return_type;
pub mod security;

pub use self::converter::EntityModelConverter;
pub use self::error::{ConfigurationError, Error, ErrorCode, ErrorValidationError, StartupError};
pub use self::link::{Link, LinkRelation, Links};
pub use self::linkers::{EntityModelResponseLinker, PagedModelResponseLinker, ResponseBodyAdvice};
pub use self::model::{
    Content, EntityModel, EntityRecord, EntityType, PageMetadata, PagedModel, Projection,
    ProjectionType,
};
pub use self::pipeline::{HandlerId, ResponseBody, ResponsePipeline};
pub use self::return_type::{DescribeType, ReturnTypeMatcher, TypeDescriptor, TypeName};
pub use self::security::{
    HttpMethod, PermissiveSecurityEvaluator, PrivilegeSecurityEvaluator, SecurityEvaluator,
    SecurityEvaluatorFactory, StrictEvaluatorConstructor, UnknownHttpMethod,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use hypermedia::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
