//! Linker for single-resource responses.

use std::sync::Arc;

use tracing::debug;

use super::{RepresentationModelLinker, ResponseBodyAdvice};
use crate::domain::{ConfigurationError, EntityModel, EntityModelConverter, TypeDescriptor, TypeName};

/// Decorates `Hal<EntityModel>` responses.
///
/// Rules, first match wins:
/// 1. no payload: unchanged;
/// 2. a `self` link is already present: unchanged, the handler built the
///    envelope itself;
/// 3. payload is not an entity: unchanged;
/// 4. otherwise the payload is converted, keeping the handler's links after
///    the resolved ones.
#[derive(Clone)]
pub struct EntityModelResponseLinker {
    inner: RepresentationModelLinker,
}

impl EntityModelResponseLinker {
    /// Create the linker around a shared converter.
    #[must_use]
    pub fn new(converter: Arc<EntityModelConverter>) -> Self {
        Self {
            inner: RepresentationModelLinker::new(converter, TypeName::ENTITY_MODEL),
        }
    }
}

impl ResponseBodyAdvice for EntityModelResponseLinker {
    type Body = EntityModel;

    fn supports(&self, return_type: &TypeDescriptor) -> bool {
        self.inner.supports(return_type)
    }

    fn convert(&self, body: EntityModel) -> Result<EntityModel, ConfigurationError> {
        let Some(content) = body.content() else {
            return Ok(body);
        };
        if body.links().has_self() {
            debug!("entity model already carries a self link");
            return Ok(body);
        }
        if !content.is_entity() {
            debug!(payload = content.type_name(), "entity model payload is not an entity");
            return Ok(body);
        }
        let (content, links) = body.into_parts();
        match content {
            Some(content) => self.inner.converter.to_model(content, Some(links)),
            None => Ok(EntityModel::empty().with_links(links)),
        }
    }
}
