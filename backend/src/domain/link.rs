//! Hypermedia links attached to representation models.
//!
//! A [`Link`] pairs a relation name with a target URI. [`Links`] keeps them in
//! insertion order and deliberately allows several links to share a relation;
//! only the adapters that render HAL care about grouping.

use std::borrow::Cow;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Relation name of a hypermedia link, e.g. `self` or `author`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkRelation(Cow<'static, str>);

impl LinkRelation {
    /// Relation identifying the canonical address of the resource itself.
    pub const SELF: Self = Self(Cow::Borrowed("self"));

    /// Build a relation from any string-like value.
    pub fn new(rel: impl Into<Cow<'static, str>>) -> Self {
        Self(rel.into())
    }

    /// Borrow the relation name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for LinkRelation {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<String> for LinkRelation {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

/// A `(relation, href)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    rel: LinkRelation,
    href: String,
}

impl Link {
    /// Create a link for `rel` pointing at `href`.
    pub fn new(rel: impl Into<LinkRelation>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }

    /// Shorthand for a link carrying [`LinkRelation::SELF`].
    pub fn self_link(href: impl Into<String>) -> Self {
        Self::new(LinkRelation::SELF, href)
    }

    /// Relation of this link.
    #[must_use]
    pub fn rel(&self) -> &LinkRelation {
        &self.rel
    }

    /// Target URI of this link.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }
}

/// Ordered collection of links belonging to one resource.
///
/// # Examples
/// ```
/// use hypermedia::domain::{Link, Links};
///
/// let resolved = Links::from(vec![Link::self_link("/books/1")]);
/// let merged = resolved.and(Links::from(vec![Link::new("self", "/b/1")]));
/// assert_eq!(merged.len(), 2);
/// assert!(merged.has_self());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<Link>);

impl Links {
    /// An empty link set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a single link.
    pub fn push(&mut self, link: Link) {
        self.0.push(link);
    }

    /// Concatenate `other` after `self`.
    ///
    /// Relations are not de-duplicated: a relation present on both sides
    /// appears twice in the result, in order.
    #[must_use]
    pub fn and(mut self, other: Links) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Whether any link carries `rel`.
    #[must_use]
    pub fn has_rel(&self, rel: &LinkRelation) -> bool {
        self.0.iter().any(|link| &link.rel == rel)
    }

    /// Whether a `self` link is present.
    #[must_use]
    pub fn has_self(&self) -> bool {
        self.has_rel(&LinkRelation::SELF)
    }

    /// Links carrying `rel`, in insertion order.
    pub fn by_rel<'a>(&'a self, rel: &'a LinkRelation) -> impl Iterator<Item = &'a Link> + 'a {
        self.0.iter().filter(move |link| &link.rel == rel)
    }

    /// Iterate all links in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.0.iter()
    }

    /// Number of links, counting duplicated relations separately.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Distinct relations in order of first appearance.
    fn relations(&self) -> Vec<&LinkRelation> {
        let mut seen: Vec<&LinkRelation> = Vec::new();
        for link in &self.0 {
            if !seen.contains(&&link.rel) {
                seen.push(&link.rel);
            }
        }
        seen
    }
}

impl From<Vec<Link>> for Links {
    fn from(value: Vec<Link>) -> Self {
        Self(value)
    }
}

impl FromIterator<Link> for Links {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Links {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

struct Href<'a>(&'a str);

impl Serialize for Href<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("href", self.0)?;
        map.end()
    }
}

struct HrefList<'a>(&'a [&'a str]);

impl Serialize for HrefList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for href in self.0 {
            seq.serialize_element(&Href(href))?;
        }
        seq.end()
    }
}

/// HAL `_links` rendering: one entry per relation, an array when a relation
/// occurs more than once.
impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let relations = self.relations();
        let mut map = serializer.serialize_map(Some(relations.len()))?;
        for rel in relations {
            let hrefs: Vec<&str> = self.by_rel(rel).map(Link::href).collect();
            match hrefs.as_slice() {
                [single] => map.serialize_entry(rel.as_str(), &Href(*single))?,
                many => map.serialize_entry(rel.as_str(), &HrefList(many))?,
            }
        }
        map.end()
    }
}
