//! Link collector deriving resource URLs from a public base URL.
//!
//! Every exposed entity type lives under a collection path. A record of that
//! type gets `{base}/{collection}/{id}` as both its `self` link and an item
//! link named after the entity type, followed by one link per association at
//! `{base}/{collection}/{id}/{association}`.

use std::collections::HashMap;

use tracing::trace;
use url::Url;

use crate::domain::ports::LinkCollector;
use crate::domain::{EntityRecord, EntityType, Link, Links};

/// Errors raised while configuring the collector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkBaseError {
    /// The base URL has no hierarchical path to append segments to.
    #[error("base URL {0} cannot carry resource paths")]
    CannotBeABase(String),
}

#[derive(Debug, Clone)]
struct Collection {
    path: String,
    associations: Vec<String>,
}

/// [`LinkCollector`] for entities exposed as REST collections.
///
/// # Examples
/// ```
/// use hypermedia::domain::ports::LinkCollector;
/// use hypermedia::domain::{EntityRecord, EntityType};
/// use hypermedia::outbound::links::RepositoryLinkCollector;
/// use url::Url;
///
/// let base = Url::parse("http://localhost:8080").expect("valid URL");
/// let collector = RepositoryLinkCollector::new(base)
///     .expect("hierarchical URL")
///     .expose(EntityType::new("Book"), "books");
/// let links = collector.links_for(&EntityRecord::new(EntityType::new("Book"), "7"));
/// assert_eq!(links.iter().next().map(|l| l.href()), Some("http://localhost:8080/books/7"));
/// ```
#[derive(Debug, Clone)]
pub struct RepositoryLinkCollector {
    base: Url,
    collections: HashMap<EntityType, Collection>,
}

impl RepositoryLinkCollector {
    /// Collector rooted at `base`.
    ///
    /// # Errors
    /// [`LinkBaseError::CannotBeABase`] for URLs such as `mailto:` that have no
    /// path hierarchy.
    pub fn new(base: Url) -> Result<Self, LinkBaseError> {
        if base.cannot_be_a_base() {
            return Err(LinkBaseError::CannotBeABase(base.to_string()));
        }
        Ok(Self {
            base,
            collections: HashMap::new(),
        })
    }

    /// Expose `entity_type` under the collection path `collection`.
    #[must_use]
    pub fn expose(mut self, entity_type: EntityType, collection: impl Into<String>) -> Self {
        self.collections.insert(
            entity_type,
            Collection {
                path: collection.into(),
                associations: Vec::new(),
            },
        );
        self
    }

    /// Add an association link for an already exposed entity type.
    ///
    /// Associations of types that were never exposed are ignored.
    #[must_use]
    pub fn with_association(
        mut self,
        entity_type: &EntityType,
        association: impl Into<String>,
    ) -> Self {
        if let Some(collection) = self.collections.get_mut(entity_type) {
            collection.associations.push(association.into());
        }
        self
    }

    fn url_for(&self, segments: &[&str]) -> Option<String> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().ok()?;
            path.pop_if_empty().extend(segments);
        }
        Some(url.into())
    }
}

/// Item relation for an entity type: the type name with a lower-case initial.
fn item_relation(entity_type: &EntityType) -> String {
    let mut chars = entity_type.as_str().chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

impl LinkCollector for RepositoryLinkCollector {
    fn links_for(&self, record: &EntityRecord) -> Links {
        let Some(collection) = self.collections.get(record.entity_type()) else {
            trace!(entity_type = %record.entity_type(), "entity type not exposed; no links");
            return Links::new();
        };
        let Some(item) = self.url_for(&[collection.path.as_str(), record.id()]) else {
            return Links::new();
        };

        let mut links = Links::new();
        links.push(Link::self_link(item.clone()));
        links.push(Link::new(item_relation(record.entity_type()), item));
        for association in &collection.associations {
            if let Some(href) =
                self.url_for(&[collection.path.as_str(), record.id(), association.as_str()])
            {
                links.push(Link::new(association.clone(), href));
            }
        }
        links
    }
}
