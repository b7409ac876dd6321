//! Domain ports for the collaborators the decoration core consumes.
//!
//! All ports are synchronous: every call is an in-memory lookup made inline on
//! the thread producing the response.

mod link_collector;
mod privilege_evaluator;
mod projection_factory;
mod projection_registry;
mod security_probe;

#[cfg(test)]
pub use link_collector::MockLinkCollector;
pub use link_collector::{LinkCollector, NoLinks};
#[cfg(test)]
pub use privilege_evaluator::MockPrivilegeEvaluator;
pub use privilege_evaluator::PrivilegeEvaluator;
#[cfg(test)]
pub use projection_factory::MockProjectionFactory;
pub use projection_factory::ProjectionFactory;
#[cfg(test)]
pub use projection_registry::MockProjectionRegistry;
pub use projection_registry::{BASE_PROJECTION, ProjectionRegistry};
#[cfg(test)]
pub use security_probe::MockSecurityConfigurationProbe;
pub use security_probe::{NoSecurityConfiguration, SecurityConfigurationProbe};
