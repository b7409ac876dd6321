//! Turns raw entity records into projected, linked entity models.

use std::sync::Arc;

use tracing::{debug, error};

use super::ports::{BASE_PROJECTION, LinkCollector, ProjectionFactory, ProjectionRegistry};
use super::{ConfigurationError, Content, EntityModel, EntityType, Links};

/// Converts one payload into an [`EntityModel`] carrying its base projection
/// and resolved links.
///
/// Stateless after construction; the collaborators are shared read-only.
#[derive(Clone)]
pub struct EntityModelConverter {
    registry: Arc<dyn ProjectionRegistry>,
    factory: Arc<dyn ProjectionFactory>,
    links: Arc<dyn LinkCollector>,
}

impl EntityModelConverter {
    /// Wire the converter to its collaborators.
    #[must_use]
    pub fn new(
        registry: Arc<dyn ProjectionRegistry>,
        factory: Arc<dyn ProjectionFactory>,
        links: Arc<dyn LinkCollector>,
    ) -> Self {
        Self {
            registry,
            factory,
            links,
        }
    }

    /// Convert `content` into an entity model.
    ///
    /// A pre-wrapped [`Content::Model`] is returned as is. Otherwise the
    /// payload's base projection is built and the record's resolved links are
    /// followed by `additional_links`. Relations are not de-duplicated across
    /// the two sets: a handler-supplied relation that the collector also
    /// resolves appears twice.
    ///
    /// # Errors
    /// [`ConfigurationError::MissingBaseProjection`] when no base projection
    /// is registered for the payload's type. Nothing is built in that case.
    pub fn to_model(
        &self,
        content: Content,
        additional_links: Option<Links>,
    ) -> Result<EntityModel, ConfigurationError> {
        let record = match content {
            Content::Model(model) => return Ok(*model),
            Content::Entity(record) => record,
            other => {
                let entity_type = EntityType::new(other.type_name());
                error!(%entity_type, "payload is not an entity and has no base projection");
                return Err(ConfigurationError::MissingBaseProjection { entity_type });
            }
        };

        let mut projections = self.registry.projections_for(record.entity_type());
        let Some(projection_type) = projections.remove(BASE_PROJECTION) else {
            error!(
                entity_type = %record.entity_type(),
                "no base projection registered for entity type"
            );
            return Err(ConfigurationError::MissingBaseProjection {
                entity_type: record.entity_type().clone(),
            });
        };

        let projection = self.factory.create_projection(&projection_type, &record);
        let mut links = self.links.links_for(&record);
        if let Some(extra) = additional_links {
            links = links.and(extra);
        }
        debug!(
            entity_type = %record.entity_type(),
            projection = %projection_type,
            links = links.len(),
            "entity converted to model"
        );
        Ok(EntityModel::new(projection).with_links(links))
    }
}
