//! Response interceptors that decorate representation models.
//!
//! Each linker handles one model shape. It claims a handler through the
//! [`ReturnTypeMatcher`] and rewrites the body through the shared
//! [`EntityModelConverter`]. Conversion failures propagate unchanged; linkers
//! perform no recovery of their own.

mod entity;
mod paged;

use std::sync::Arc;

pub use entity::EntityModelResponseLinker;
pub use paged::PagedModelResponseLinker;

use super::{ConfigurationError, EntityModelConverter, ReturnTypeMatcher, TypeDescriptor, TypeName};

/// Hook invoked between "handler produced a value" and serialisation.
pub trait ResponseBodyAdvice: Send + Sync {
    /// Body type this advice rewrites.
    type Body;

    /// Whether the handler's declared return type is handled by this advice.
    fn supports(&self, return_type: &TypeDescriptor) -> bool;

    /// Decorate `body`, or hand it back untouched when it is not eligible.
    ///
    /// # Errors
    /// Propagates [`ConfigurationError`] from the converter.
    fn convert(&self, body: Self::Body) -> Result<Self::Body, ConfigurationError>;

    /// Entry point called by the response pipeline.
    ///
    /// # Errors
    /// Same as [`ResponseBodyAdvice::convert`].
    fn before_body_write(&self, body: Self::Body) -> Result<Self::Body, ConfigurationError> {
        self.convert(body)
    }
}

/// State shared by both linker variants.
#[derive(Clone)]
struct RepresentationModelLinker {
    converter: Arc<EntityModelConverter>,
    matcher: ReturnTypeMatcher,
}

impl RepresentationModelLinker {
    fn new(converter: Arc<EntityModelConverter>, supported: TypeName) -> Self {
        Self {
            converter,
            matcher: ReturnTypeMatcher::new(supported),
        }
    }

    fn supports(&self, return_type: &TypeDescriptor) -> bool {
        self.matcher.supports(return_type)
    }
}
