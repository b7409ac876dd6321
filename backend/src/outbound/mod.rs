//! Outbound adapters implementing domain ports.
//!
//! - **projection**: in-memory projection registry and an attribute-selecting
//!   projection factory.
//! - **links**: link collector deriving resource URLs from a base URL.
//! - **access_rules**: JSON access rules acting as the security configuration.
//!
//! Adapters are thin translators between configuration and domain types. They
//! contain no decoration logic.

pub mod access_rules;
pub mod links;
pub mod projection;
