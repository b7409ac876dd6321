//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain traits and remain testable without I/O.

use std::sync::Arc;

use crate::domain::SecurityEvaluator;

/// Dependency bundle for the security meta handlers.
#[derive(Clone)]
pub struct HttpState {
    pub security: Arc<dyn SecurityEvaluator>,
}

impl HttpState {
    /// Bundle the evaluator selected at startup.
    pub fn new(security: Arc<dyn SecurityEvaluator>) -> Self {
        Self { security }
    }
}
