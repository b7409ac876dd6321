//! Representation models and the payloads they wrap.
//!
//! Reflection is replaced by an explicit tag: [`Content::Entity`] is the only
//! variant carrying the domain-record marker, so "is this payload an entity?"
//! is a pattern match rather than a runtime annotation lookup.
//!
//! Serialisation follows HAL: entity models flatten their payload next to a
//! `_links` object; paged models render `_embedded.content`, `_links` and
//! `page`.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::link::Links;

/// Logical type name of a persistence entity, e.g. `Book`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    /// Wrap a type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the type name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a registered projection, e.g. `BookBaseProjection`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectionType(String);

impl ProjectionType {
    /// Wrap a projection name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the projection name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw entity as handed over by the persistence layer.
///
/// The decoration pipeline only ever reads a record.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    entity_type: EntityType,
    id: String,
    attributes: Map<String, Value>,
}

impl EntityRecord {
    /// Create a record without attributes.
    pub fn new(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self {
            entity_type,
            id: id.into(),
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Runtime type of the record.
    #[must_use]
    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    /// Identifier used when building resource URIs.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All persisted attributes.
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

/// Client-facing view of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    projection_type: ProjectionType,
    attributes: Map<String, Value>,
}

impl Projection {
    /// Create a projection of `projection_type` exposing `attributes`.
    #[must_use]
    pub fn new(projection_type: ProjectionType, attributes: Map<String, Value>) -> Self {
        Self {
            projection_type,
            attributes,
        }
    }

    /// The registered projection this view was built from.
    #[must_use]
    pub fn projection_type(&self) -> &ProjectionType {
        &self.projection_type
    }

    /// Exposed attributes.
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

/// Payload of a representation model.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Persistence entity; the only decoratable variant.
    Entity(EntityRecord),
    /// Projection already built by the handler.
    Projection(Projection),
    /// Envelope the handler wrapped itself.
    Model(Box<EntityModel>),
    /// Any other serialisable value.
    Value(Value),
}

impl Content {
    /// Whether this payload carries the domain-record marker.
    #[must_use]
    pub const fn is_entity(&self) -> bool {
        matches!(self, Self::Entity(_))
    }

    /// Name of the runtime type, used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Entity(record) => record.entity_type().as_str(),
            Self::Projection(projection) => projection.projection_type().as_str(),
            Self::Model(_) => "EntityModel",
            Self::Value(_) => "Value",
        }
    }
}

impl From<EntityRecord> for Content {
    fn from(value: EntityRecord) -> Self {
        Self::Entity(value)
    }
}

impl From<Projection> for Content {
    fn from(value: Projection) -> Self {
        Self::Projection(value)
    }
}

impl From<EntityModel> for Content {
    fn from(value: EntityModel) -> Self {
        Self::Model(Box::new(value))
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Entity(record) => record.attributes().serialize(serializer),
            Self::Projection(projection) => projection.attributes().serialize(serializer),
            Self::Model(model) => model.serialize(serializer),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}

/// Single-resource representation model: an optional payload plus links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityModel {
    content: Option<Content>,
    links: Links,
}

impl EntityModel {
    /// Wrap `content` without links.
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: Some(content.into()),
            links: Links::new(),
        }
    }

    /// A model with no payload.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the link set.
    #[must_use]
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = links;
        self
    }

    /// Wrapped payload, if any.
    #[must_use]
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// Links attached to the model.
    #[must_use]
    pub fn links(&self) -> &Links {
        &self.links
    }

    /// Split into payload and links.
    #[must_use]
    pub fn into_parts(self) -> (Option<Content>, Links) {
        (self.content, self.links)
    }
}

/// Reserved for the model's own links; an attribute of that name is dropped.
const LINKS_KEY: &str = "_links";

impl Serialize for EntityModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = match &self.content {
            Some(Content::Entity(record)) => Some(record.attributes()),
            Some(Content::Projection(projection)) => Some(projection.attributes()),
            Some(Content::Value(Value::Object(map))) => Some(map),
            _ => None,
        };
        let mut map = serializer.serialize_map(None)?;
        match (fields, &self.content) {
            (Some(fields), _) => {
                for (name, value) in fields.iter().filter(|(name, _)| *name != LINKS_KEY) {
                    map.serialize_entry(name, value)?;
                }
            }
            (None, Some(other)) => map.serialize_entry("content", other)?,
            (None, None) => {}
        }
        if !self.links.is_empty() {
            map.serialize_entry(LINKS_KEY, &self.links)?;
        }
        map.end()
    }
}

/// Paging information carried verbatim through decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Requested page size.
    pub size: u64,
    /// Zero-based page number.
    pub number: u64,
    /// Number of elements across all pages.
    pub total_elements: u64,
    /// Number of pages.
    pub total_pages: u64,
}

impl PageMetadata {
    /// Derive `total_pages` from the other three values.
    #[must_use]
    pub const fn new(size: u64, number: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };
        Self {
            size,
            number,
            total_elements,
            total_pages,
        }
    }
}

/// Collection representation model with page metadata and top-level links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagedModel {
    content: Vec<Content>,
    metadata: Option<PageMetadata>,
    links: Links,
}

impl PagedModel {
    /// Build a paged model from its three parts.
    #[must_use]
    pub fn new(content: Vec<Content>, metadata: Option<PageMetadata>, links: Links) -> Self {
        Self {
            content,
            metadata,
            links,
        }
    }

    /// Elements in page order.
    #[must_use]
    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Page metadata, if the collection is paged.
    #[must_use]
    pub fn metadata(&self) -> Option<&PageMetadata> {
        self.metadata.as_ref()
    }

    /// Links of the collection itself.
    #[must_use]
    pub fn links(&self) -> &Links {
        &self.links
    }

    /// Split into elements, metadata and links.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Content>, Option<PageMetadata>, Links) {
        (self.content, self.metadata, self.links)
    }
}

impl Serialize for PagedModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Embedded<'a>(&'a [Content]);

        impl Serialize for Embedded<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("content", self.0)?;
                map.end()
            }
        }

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("_embedded", &Embedded(&self.content))?;
        if !self.links.is_empty() {
            map.serialize_entry(LINKS_KEY, &self.links)?;
        }
        if let Some(page) = &self.metadata {
            map.serialize_entry("page", page)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Link;
    use rstest::rstest;
    use serde_json::json;

    fn book() -> EntityRecord {
        EntityRecord::new(EntityType::new("Book"), "1").with_attribute("title", "Dune")
    }

    #[rstest]
    #[case(Content::Entity(book()), true)]
    #[case(Content::Value(json!({"title": "Dune"})), false)]
    #[case(Content::from(EntityModel::new(book())), false)]
    fn only_entities_carry_the_marker(#[case] content: Content, #[case] expected: bool) {
        assert_eq!(content.is_entity(), expected);
    }

    #[rstest]
    #[case(10, 0, 0, 0)]
    #[case(10, 0, 10, 1)]
    #[case(10, 2, 21, 3)]
    #[case(0, 0, 5, 0)]
    fn page_metadata_derives_total_pages(
        #[case] size: u64,
        #[case] number: u64,
        #[case] total: u64,
        #[case] pages: u64,
    ) {
        assert_eq!(PageMetadata::new(size, number, total).total_pages, pages);
    }

    #[rstest]
    fn entity_model_flattens_object_payloads() {
        let projection = Projection::new(
            ProjectionType::new("BookBase"),
            json!({"title": "Dune"})
                .as_object()
                .cloned()
                .unwrap_or_default(),
        );
        let model = EntityModel::new(projection)
            .with_links(Links::from(vec![Link::self_link("/books/1")]));

        let value = serde_json::to_value(&model).expect("model serialises");

        assert_eq!(
            value,
            json!({"title": "Dune", "_links": {"self": {"href": "/books/1"}}})
        );
    }

    #[rstest]
    #[case(Links::from(vec![Link::self_link("/books/1")]), json!({"title": "Dune", "_links": {"self": {"href": "/books/1"}}}))]
    #[case(Links::default(), json!({"title": "Dune"}))]
    fn attribute_named_links_is_not_written(#[case] links: Links, #[case] expected: Value) {
        let record = book().with_attribute("_links", "user data");
        let model = EntityModel::new(record).with_links(links);

        let text = serde_json::to_string(&model).expect("model serialises");

        assert!(text.matches("\"_links\"").count() <= 1, "duplicate key in {text}");
        assert!(!text.contains("user data"));
        let value: Value = serde_json::from_str(&text).expect("valid JSON");
        assert_eq!(value, expected);
    }

    #[rstest]
    fn entity_model_nests_scalar_payloads() {
        let model = EntityModel::new(json!(42));
        let value = serde_json::to_value(&model).expect("model serialises");
        assert_eq!(value, json!({"content": 42}));
    }

    #[rstest]
    fn paged_model_renders_embedded_links_and_page() {
        let model = PagedModel::new(
            vec![Content::Value(json!({"n": 1}))],
            Some(PageMetadata::new(20, 0, 1)),
            Links::from(vec![Link::self_link("/books?page=0")]),
        );

        let value = serde_json::to_value(&model).expect("paged model serialises");

        assert_eq!(
            value,
            json!({
                "_embedded": {"content": [{"n": 1}]},
                "_links": {"self": {"href": "/books?page=0"}},
                "page": {"size": 20, "number": 0, "totalElements": 1, "totalPages": 1},
            })
        );
    }
}
