//! Port resolving the hypermedia links of a record.

use crate::domain::{EntityRecord, Links};

/// Resolves the links a record exposes (self, item and association links).
#[cfg_attr(test, mockall::automock)]
pub trait LinkCollector: Send + Sync {
    /// Links for `record`; empty rather than failing when none apply.
    fn links_for(&self, record: &EntityRecord) -> Links;
}

/// Collector that never produces links.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLinks;

impl LinkCollector for NoLinks {
    fn links_for(&self, _record: &EntityRecord) -> Links {
        Links::new()
    }
}
