//! Port building projection instances over entity records.

use crate::domain::{EntityRecord, Projection, ProjectionType};

/// Instantiates a registered projection over a record.
///
/// Infallible for projection types obtained from the registry.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectionFactory: Send + Sync {
    /// Build a `projection_type` view of `record`.
    fn create_projection(
        &self,
        projection_type: &ProjectionType,
        record: &EntityRecord,
    ) -> Projection;
}
