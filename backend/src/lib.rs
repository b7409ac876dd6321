//! Hypermedia response decoration for Actix services.
//!
//! - [`domain`]: representation models, the decoration core and the security
//!   evaluator.
//! - [`outbound`]: in-memory adapters for the domain ports.
//! - [`inbound`]: the `Hal<M>` responder and the security meta endpoints.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
