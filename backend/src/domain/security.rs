//! Security meta queries: which HTTP methods may be used on which paths.
//!
//! The evaluator is chosen once at startup. Without a security configuration
//! the [`PermissiveSecurityEvaluator`] answers every query positively. When the
//! [`SecurityConfigurationProbe`] reports a configuration, a strict evaluator
//! is built from it, and any failure to do so aborts startup. There is no
//! silent fallback to the permissive evaluator in that case.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::StartupError;
use super::ports::{PrivilegeEvaluator, SecurityConfigurationProbe};

/// HTTP methods covered by security meta queries.
///
/// Ordering follows declaration order so method sets iterate as
/// `GET, POST, PUT, PATCH, DELETE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Every method, in canonical order.
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method name is outside [`HttpMethod::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnknownHttpMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownHttpMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownHttpMethod(s.to_owned()))
    }
}

/// Query interface used by routing and authorisation middleware.
pub trait SecurityEvaluator: Send + Sync {
    /// Methods the caller may use on `path`.
    fn allowed_methods(&self, path: &str) -> BTreeSet<HttpMethod>;

    /// Whether `method` may be used on `path`.
    fn is_allowed(&self, path: &str, method: HttpMethod) -> bool;
}

/// Evaluator used when no security configuration is present.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissiveSecurityEvaluator;

impl SecurityEvaluator for PermissiveSecurityEvaluator {
    fn allowed_methods(&self, _path: &str) -> BTreeSet<HttpMethod> {
        HttpMethod::ALL.into_iter().collect()
    }

    fn is_allowed(&self, _path: &str, _method: HttpMethod) -> bool {
        true
    }
}

/// Evaluator delegating every decision to the detected security
/// configuration.
pub struct PrivilegeSecurityEvaluator {
    privileges: Arc<dyn PrivilegeEvaluator>,
}

impl PrivilegeSecurityEvaluator {
    /// Wrap a privilege evaluator.
    #[must_use]
    pub fn new(privileges: Arc<dyn PrivilegeEvaluator>) -> Self {
        Self { privileges }
    }

    /// [`StrictEvaluatorConstructor`] registered by default.
    pub fn construct(
        privileges: Arc<dyn PrivilegeEvaluator>,
    ) -> Result<Arc<dyn SecurityEvaluator>, StartupError> {
        Ok(Arc::new(Self::new(privileges)))
    }
}

impl SecurityEvaluator for PrivilegeSecurityEvaluator {
    fn allowed_methods(&self, path: &str) -> BTreeSet<HttpMethod> {
        HttpMethod::ALL
            .into_iter()
            .filter(|method| self.privileges.is_allowed(path, *method))
            .collect()
    }

    fn is_allowed(&self, path: &str, method: HttpMethod) -> bool {
        self.privileges.is_allowed(path, method)
    }
}

/// Builds the strict evaluator from a detected security configuration.
pub type StrictEvaluatorConstructor =
    fn(Arc<dyn PrivilegeEvaluator>) -> Result<Arc<dyn SecurityEvaluator>, StartupError>;

/// Startup-time strategy selecting the security evaluator.
///
/// # Examples
/// ```
/// use hypermedia::domain::{HttpMethod, SecurityEvaluatorFactory};
/// use hypermedia::domain::ports::NoSecurityConfiguration;
///
/// let evaluator = SecurityEvaluatorFactory::default()
///     .create(&NoSecurityConfiguration)
///     .expect("permissive evaluator");
/// assert!(evaluator.is_allowed("/any", HttpMethod::Delete));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SecurityEvaluatorFactory {
    strict: Option<StrictEvaluatorConstructor>,
}

impl Default for SecurityEvaluatorFactory {
    /// Registers [`PrivilegeSecurityEvaluator::construct`] when the
    /// `strict-security` feature is enabled.
    fn default() -> Self {
        if cfg!(feature = "strict-security") {
            Self::with_strict(PrivilegeSecurityEvaluator::construct)
        } else {
            Self::permissive_only()
        }
    }
}

impl SecurityEvaluatorFactory {
    /// Factory with a strict constructor registered.
    #[must_use]
    pub const fn with_strict(constructor: StrictEvaluatorConstructor) -> Self {
        Self {
            strict: Some(constructor),
        }
    }

    /// Factory without a strict constructor; a detected configuration is fatal.
    #[must_use]
    pub const fn permissive_only() -> Self {
        Self { strict: None }
    }

    /// Pick and construct the evaluator.
    ///
    /// # Errors
    /// Returns [`StartupError`] when the probe fails, or when a configuration
    /// is present and the strict evaluator is missing or cannot be built.
    pub fn create(
        &self,
        probe: &dyn SecurityConfigurationProbe,
    ) -> Result<Arc<dyn SecurityEvaluator>, StartupError> {
        let Some(privileges) = probe.detect()? else {
            info!(evaluator = "permissive", "no security configuration detected");
            return Ok(Arc::new(PermissiveSecurityEvaluator));
        };
        let constructor = self
            .strict
            .ok_or(StartupError::StrictImplementationMissing)?;
        let evaluator = constructor(privileges)?;
        info!(evaluator = "strict", "security configuration detected");
        Ok(evaluator)
    }
}
