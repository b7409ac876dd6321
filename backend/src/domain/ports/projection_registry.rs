//! Port exposing the projections registered per entity type.

use std::collections::HashMap;

use crate::domain::{EntityType, ProjectionType};

/// Logical name of the projection used for every decorated response.
pub const BASE_PROJECTION: &str = "baseProjection";

/// Read-only view of the projection configuration.
///
/// Populated once while the process is configured. A missing
/// [`BASE_PROJECTION`] entry for a type that reaches decoration is a
/// deployment defect, not a data error.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectionRegistry: Send + Sync {
    /// Projections registered for `entity_type`, keyed by logical name.
    ///
    /// Returns an empty map for unknown types.
    fn projections_for(&self, entity_type: &EntityType) -> HashMap<String, ProjectionType>;
}
