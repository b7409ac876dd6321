//! Response pipeline running the linkers before serialisation.
//!
//! Each handler is identified by its HTTP method and route pattern. The
//! linkers' `supports` verdicts are computed once per handler when the route is
//! registered and reused for every response it produces.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use super::linkers::{EntityModelResponseLinker, PagedModelResponseLinker, ResponseBodyAdvice};
use super::{ConfigurationError, EntityModel, EntityModelConverter, PagedModel, TypeDescriptor};

/// Stable identity of a route handler, rendered as `"{METHOD} {pattern}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerId(String);

impl HandlerId {
    /// Identify the handler serving `method` on the route `pattern`.
    ///
    /// # Examples
    /// ```
    /// use hypermedia::domain::HandlerId;
    ///
    /// assert_eq!(HandlerId::new("get", "/books/{id}").as_str(), "GET /books/{id}");
    /// ```
    pub fn new(method: impl AsRef<str>, pattern: impl AsRef<str>) -> Self {
        Self(format!(
            "{} {}",
            method.as_ref().to_ascii_uppercase(),
            pattern.as_ref()
        ))
    }

    /// Rendered identity.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body produced by a handler, before decoration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Single-resource representation model.
    Entity(EntityModel),
    /// Paged-collection representation model.
    Paged(PagedModel),
    /// Anything else; never decorated.
    Other(Value),
}

impl From<EntityModel> for ResponseBody {
    fn from(value: EntityModel) -> Self {
        Self::Entity(value)
    }
}

impl From<PagedModel> for ResponseBody {
    fn from(value: PagedModel) -> Self {
        Self::Paged(value)
    }
}

impl From<Value> for ResponseBody {
    fn from(value: Value) -> Self {
        Self::Other(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Verdict {
    entity: bool,
    paged: bool,
}

/// Runs every registered linker over handler responses.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use hypermedia::domain::ports::NoLinks;
/// use hypermedia::domain::{
///     DescribeType, EntityModel, EntityModelConverter, HandlerId, ResponseBody,
///     ResponsePipeline, TypeDescriptor, TypeName,
/// };
/// use hypermedia::outbound::projection::{AttributeProjectionFactory, InMemoryProjectionRegistry};
///
/// let converter = EntityModelConverter::new(
///     Arc::new(InMemoryProjectionRegistry::default()),
///     Arc::new(AttributeProjectionFactory::default()),
///     Arc::new(NoLinks),
/// );
/// let handler = HandlerId::new("GET", "/books/{id}");
/// let return_type = TypeDescriptor::parameterized(TypeName::HAL, vec![EntityModel::type_descriptor()]);
/// let pipeline = ResponsePipeline::new(Arc::new(converter)).register(handler.clone(), &return_type);
///
/// let body = pipeline
///     .before_body_write(&handler, &return_type, ResponseBody::from(EntityModel::empty()))
///     .expect("empty models pass through");
/// assert_eq!(body, ResponseBody::from(EntityModel::empty()));
/// ```
#[derive(Clone)]
pub struct ResponsePipeline {
    entity: EntityModelResponseLinker,
    paged: PagedModelResponseLinker,
    verdicts: HashMap<HandlerId, Verdict>,
}

impl ResponsePipeline {
    /// Pipeline with both linkers sharing `converter`.
    #[must_use]
    pub fn new(converter: Arc<EntityModelConverter>) -> Self {
        Self {
            entity: EntityModelResponseLinker::new(Arc::clone(&converter)),
            paged: PagedModelResponseLinker::new(converter),
            verdicts: HashMap::new(),
        }
    }

    /// Record which linkers apply to `handler`.
    #[must_use]
    pub fn register(mut self, handler: HandlerId, return_type: &TypeDescriptor) -> Self {
        let verdict = self.evaluate(return_type);
        debug!(
            %handler,
            %return_type,
            entity = verdict.entity,
            paged = verdict.paged,
            "handler registered for response linking"
        );
        self.verdicts.insert(handler, verdict);
        self
    }

    /// Whether any linker applies to `handler`.
    #[must_use]
    pub fn decorates(&self, handler: &HandlerId, return_type: &TypeDescriptor) -> bool {
        let verdict = self.verdict(handler, return_type);
        verdict.entity || verdict.paged
    }

    /// Decorate `body` with every linker that supports the handler.
    ///
    /// # Errors
    /// Propagates [`ConfigurationError`] from the linkers.
    pub fn before_body_write(
        &self,
        handler: &HandlerId,
        return_type: &TypeDescriptor,
        body: ResponseBody,
    ) -> Result<ResponseBody, ConfigurationError> {
        let verdict = self.verdict(handler, return_type);
        match body {
            ResponseBody::Entity(model) if verdict.entity => self
                .entity
                .before_body_write(model)
                .map(ResponseBody::Entity),
            ResponseBody::Paged(model) if verdict.paged => self
                .paged
                .before_body_write(model)
                .map(ResponseBody::Paged),
            other => Ok(other),
        }
    }

    fn verdict(&self, handler: &HandlerId, return_type: &TypeDescriptor) -> Verdict {
        self.verdicts.get(handler).copied().unwrap_or_else(|| {
            trace!(%handler, "handler not registered; evaluating return type");
            self.evaluate(return_type)
        })
    }

    fn evaluate(&self, return_type: &TypeDescriptor) -> Verdict {
        Verdict {
            entity: self.entity.supports(return_type),
            paged: self.paged.supports(return_type),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::HashMap;

    use super::*;
    use crate::domain::ports::{
        BASE_PROJECTION, MockLinkCollector, MockProjectionFactory, MockProjectionRegistry,
    };
    use crate::domain::{
        Content, DescribeType, EntityRecord, EntityType, Link, Links, Projection, ProjectionType,
        TypeName,
    };
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn hal(inner: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::parameterized(TypeName::HAL, vec![inner])
    }

    fn book(id: &str) -> Content {
        Content::Entity(EntityRecord::new(EntityType::new("Book"), id))
    }

    #[fixture]
    fn pipeline() -> ResponsePipeline {
        let mut registry = MockProjectionRegistry::new();
        registry.expect_projections_for().returning(|_| {
            HashMap::from([(BASE_PROJECTION.to_owned(), ProjectionType::new("BookBase"))])
        });
        let mut factory = MockProjectionFactory::new();
        factory
            .expect_create_projection()
            .returning(|projection_type, record| {
                Projection::new(projection_type.clone(), record.attributes().clone())
            });
        let mut links = MockLinkCollector::new();
        links.expect_links_for().returning(|record| {
            Links::from(vec![Link::self_link(format!("/books/{}", record.id()))])
        });
        ResponsePipeline::new(Arc::new(EntityModelConverter::new(
            Arc::new(registry),
            Arc::new(factory),
            Arc::new(links),
        )))
        .register(
            HandlerId::new("GET", "/books/{id}"),
            &hal(EntityModel::type_descriptor()),
        )
        .register(HandlerId::new("GET", "/books"), &hal(PagedModel::type_descriptor()))
        .register(HandlerId::new("GET", "/raw"), &Value::type_descriptor())
    }

    #[rstest]
    fn registered_entity_handler_is_decorated(pipeline: ResponsePipeline) {
        let handler = HandlerId::new("GET", "/books/{id}");
        let body = ResponseBody::from(EntityModel::new(book("1")));

        let decorated = pipeline
            .before_body_write(&handler, &hal(EntityModel::type_descriptor()), body)
            .expect("decorated");

        let ResponseBody::Entity(model) = decorated else {
            panic!("expected an entity model");
        };
        assert!(model.links().has_self());
    }

    #[rstest]
    fn registered_paged_handler_is_decorated(pipeline: ResponsePipeline) {
        let handler = HandlerId::new("GET", "/books");
        let body = ResponseBody::from(PagedModel::new(vec![book("1")], None, Links::new()));

        let decorated = pipeline
            .before_body_write(&handler, &hal(PagedModel::type_descriptor()), body)
            .expect("decorated");

        let ResponseBody::Paged(model) = decorated else {
            panic!("expected a paged model");
        };
        assert!(matches!(model.content().first(), Some(Content::Model(_))));
    }

    #[rstest]
    fn cached_verdict_wins_over_the_given_descriptor(pipeline: ResponsePipeline) {
        let handler = HandlerId::new("GET", "/raw");
        let body = ResponseBody::from(EntityModel::new(book("1")));

        let result = pipeline
            .before_body_write(&handler, &hal(EntityModel::type_descriptor()), body.clone())
            .expect("not decorated");

        assert_eq!(result, body);
        assert!(!pipeline.decorates(&handler, &hal(EntityModel::type_descriptor())));
    }

    #[rstest]
    fn unregistered_handlers_are_evaluated_on_demand(pipeline: ResponsePipeline) {
        let handler = HandlerId::new("GET", "/unregistered");
        assert!(pipeline.decorates(&handler, &hal(EntityModel::type_descriptor())));
        assert!(!pipeline.decorates(&handler, &Value::type_descriptor()));
    }

    #[rstest]
    fn mismatched_body_shape_is_left_alone(pipeline: ResponsePipeline) {
        let handler = HandlerId::new("GET", "/books/{id}");
        let body = ResponseBody::from(json!({"plain": true}));

        let result = pipeline
            .before_body_write(&handler, &hal(EntityModel::type_descriptor()), body.clone())
            .expect("untouched");

        assert_eq!(result, body);
    }

    #[rstest]
    fn handler_ids_normalise_the_method() {
        assert_eq!(HandlerId::new("patch", "/x").to_string(), "PATCH /x");
    }
}
