//! Linker for paged collection responses.

use std::sync::Arc;

use tracing::debug;

use super::{RepresentationModelLinker, ResponseBodyAdvice};
use crate::domain::{
    ConfigurationError, Content, EntityModelConverter, PagedModel, TypeDescriptor, TypeName,
};

/// Decorates `Hal<PagedModel>` responses.
///
/// Only the first element decides whether the page holds entities; pages are
/// assumed homogeneous. Every element is then converted without extra links,
/// in order, and the page metadata and collection links are carried over
/// verbatim.
#[derive(Clone)]
pub struct PagedModelResponseLinker {
    inner: RepresentationModelLinker,
}

impl PagedModelResponseLinker {
    /// Create the linker around a shared converter.
    #[must_use]
    pub fn new(converter: Arc<EntityModelConverter>) -> Self {
        Self {
            inner: RepresentationModelLinker::new(converter, TypeName::PAGED_MODEL),
        }
    }
}

impl ResponseBodyAdvice for PagedModelResponseLinker {
    type Body = PagedModel;

    fn supports(&self, return_type: &TypeDescriptor) -> bool {
        self.inner.supports(return_type)
    }

    fn convert(&self, body: PagedModel) -> Result<PagedModel, ConfigurationError> {
        let Some(first) = body.content().first() else {
            return Ok(body);
        };
        if !first.is_entity() {
            debug!(payload = first.type_name(), "paged model does not hold entities");
            return Ok(body);
        }
        let (content, metadata, links) = body.into_parts();
        let models = content
            .into_iter()
            .map(|element| {
                self.inner
                    .converter
                    .to_model(element, None)
                    .map(Content::from)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PagedModel::new(models, metadata, links))
    }
}
