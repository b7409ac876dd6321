//! In-memory projection lookup and construction.

use std::collections::HashMap;

use serde_json::Map;

use crate::domain::ports::{ProjectionFactory, ProjectionRegistry};
use crate::domain::{EntityRecord, EntityType, Projection, ProjectionType};

/// Projection registry populated at startup.
///
/// # Examples
/// ```
/// use hypermedia::domain::ports::{BASE_PROJECTION, ProjectionRegistry};
/// use hypermedia::domain::{EntityType, ProjectionType};
/// use hypermedia::outbound::projection::InMemoryProjectionRegistry;
///
/// let registry = InMemoryProjectionRegistry::default().register(
///     EntityType::new("Book"),
///     BASE_PROJECTION,
///     ProjectionType::new("BookBase"),
/// );
/// let projections = registry.projections_for(&EntityType::new("Book"));
/// assert_eq!(projections.get(BASE_PROJECTION), Some(&ProjectionType::new("BookBase")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectionRegistry {
    entries: HashMap<EntityType, HashMap<String, ProjectionType>>,
}

impl InMemoryProjectionRegistry {
    /// Register `projection_type` under `logical_name` for `entity_type`.
    ///
    /// A later registration of the same logical name replaces the earlier one.
    #[must_use]
    pub fn register(
        mut self,
        entity_type: EntityType,
        logical_name: impl Into<String>,
        projection_type: ProjectionType,
    ) -> Self {
        self.entries
            .entry(entity_type)
            .or_default()
            .insert(logical_name.into(), projection_type);
        self
    }
}

impl ProjectionRegistry for InMemoryProjectionRegistry {
    fn projections_for(&self, entity_type: &EntityType) -> HashMap<String, ProjectionType> {
        self.entries.get(entity_type).cloned().unwrap_or_default()
    }
}

/// Builds projections by selecting a fixed attribute list from the record.
///
/// Projection types without a definition expose every attribute.
#[derive(Debug, Clone, Default)]
pub struct AttributeProjectionFactory {
    definitions: HashMap<ProjectionType, Vec<String>>,
}

impl AttributeProjectionFactory {
    /// Expose only `attributes`, in that order, for `projection_type`.
    #[must_use]
    pub fn define<I, S>(mut self, projection_type: ProjectionType, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definitions.insert(
            projection_type,
            attributes.into_iter().map(Into::into).collect(),
        );
        self
    }
}

impl ProjectionFactory for AttributeProjectionFactory {
    fn create_projection(
        &self,
        projection_type: &ProjectionType,
        record: &EntityRecord,
    ) -> Projection {
        let source = record.attributes();
        let attributes = match self.definitions.get(projection_type) {
            Some(names) => names
                .iter()
                .filter_map(|name| source.get(name).map(|value| (name.clone(), value.clone())))
                .collect::<Map<_, _>>(),
            None => source.clone(),
        };
        Projection::new(projection_type.clone(), attributes)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::BASE_PROJECTION;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn record() -> EntityRecord {
        EntityRecord::new(EntityType::new("Book"), "1")
            .with_attribute("title", "Dune")
            .with_attribute("isbn", "978-0441013593")
            .with_attribute("internalNotes", "restock")
    }

    #[rstest]
    fn unknown_entity_types_have_no_projections() {
        let registry = InMemoryProjectionRegistry::default();
        assert!(registry.projections_for(&EntityType::new("Book")).is_empty());
    }

    #[rstest]
    fn later_registrations_replace_earlier_ones() {
        let registry = InMemoryProjectionRegistry::default()
            .register(EntityType::new("Book"), BASE_PROJECTION, ProjectionType::new("Old"))
            .register(EntityType::new("Book"), "summary", ProjectionType::new("BookSummary"))
            .register(EntityType::new("Book"), BASE_PROJECTION, ProjectionType::new("BookBase"));

        let projections = registry.projections_for(&EntityType::new("Book"));

        assert_eq!(projections.len(), 2);
        assert_eq!(
            projections.get(BASE_PROJECTION),
            Some(&ProjectionType::new("BookBase"))
        );
    }

    #[rstest]
    fn defined_projections_select_listed_attributes(record: EntityRecord) {
        let factory = AttributeProjectionFactory::default()
            .define(ProjectionType::new("BookBase"), ["title", "isbn", "missing"]);

        let projection = factory.create_projection(&ProjectionType::new("BookBase"), &record);

        assert_eq!(
            serde_json::Value::Object(projection.attributes().clone()),
            json!({"title": "Dune", "isbn": "978-0441013593"})
        );
    }

    #[rstest]
    fn undefined_projections_expose_everything(record: EntityRecord) {
        let factory = AttributeProjectionFactory::default();

        let projection = factory.create_projection(&ProjectionType::new("Anything"), &record);

        assert_eq!(projection.attributes(), record.attributes());
        assert_eq!(projection.projection_type(), &ProjectionType::new("Anything"));
    }
}
