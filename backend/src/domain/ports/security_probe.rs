//! Port detecting an optional security configuration at startup.

use std::sync::Arc;

use super::PrivilegeEvaluator;
use crate::domain::StartupError;

/// Capability check against the hosting environment.
///
/// `Ok(None)` means no security configuration is present and the permissive
/// evaluator is safe. `Ok(Some(_))` hands over the configuration for the strict
/// evaluator. An `Err` means a configuration is present but unusable and must
/// abort startup.
#[cfg_attr(test, mockall::automock)]
pub trait SecurityConfigurationProbe: Send + Sync {
    /// Look for a security configuration.
    fn detect(&self) -> Result<Option<Arc<dyn PrivilegeEvaluator>>, StartupError>;
}

/// Probe for deployments without any security configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSecurityConfiguration;

impl SecurityConfigurationProbe for NoSecurityConfiguration {
    fn detect(&self) -> Result<Option<Arc<dyn PrivilegeEvaluator>>, StartupError> {
        Ok(None)
    }
}
