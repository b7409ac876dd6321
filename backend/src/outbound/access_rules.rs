//! JSON access rules used as the security configuration.
//!
//! The rules file holds an array of `{ "pattern": .., "methods": [..] }`
//! entries. A pattern is either an exact path or a prefix ending in `/**`,
//! which matches the prefix itself and everything below it. A request is
//! allowed when any matching rule lists its method; paths no rule matches are
//! denied.
//!
//! ```json
//! [
//!   { "pattern": "/books/**", "methods": ["GET"] },
//!   { "pattern": "/books/drafts", "methods": ["GET", "POST"] }
//! ]
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::ports::{PrivilegeEvaluator, SecurityConfigurationProbe};
use crate::domain::{HttpMethod, StartupError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct AccessRule {
    pattern: String,
    methods: BTreeSet<HttpMethod>,
}

impl AccessRule {
    fn matches(&self, path: &str) -> bool {
        match self.pattern.strip_suffix("/**") {
            Some(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            None => path == self.pattern,
        }
    }
}

/// Parsed access rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AccessRules {
    rules: Vec<AccessRule>,
}

impl AccessRules {
    /// Parse rules from their JSON text.
    ///
    /// # Errors
    /// Returns the parse error for malformed JSON, unknown methods or missing
    /// fields.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read and parse the rules file at `path`.
    ///
    /// # Errors
    /// [`StartupError::RulesRead`] when the file cannot be read and
    /// [`StartupError::RulesParse`] when its content is invalid.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let text = fs::read_to_string(path).map_err(|source| StartupError::RulesRead {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::from_json(&text).map_err(|source| StartupError::RulesParse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), rules = rules.len(), "access rules loaded");
        Ok(rules)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are defined, which denies every request.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl PrivilegeEvaluator for AccessRules {
    fn is_allowed(&self, path: &str, method: HttpMethod) -> bool {
        let allowed = self
            .rules
            .iter()
            .filter(|rule| rule.matches(path))
            .any(|rule| rule.methods.contains(&method));
        debug!(path, %method, allowed, "access rules evaluated");
        allowed
    }
}

/// Detects a security configuration by the presence of a rules path.
#[derive(Debug, Clone, Default)]
pub struct AccessRulesProbe {
    path: Option<PathBuf>,
}

impl AccessRulesProbe {
    /// Probe for the optional rules file at `path`.
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl SecurityConfigurationProbe for AccessRulesProbe {
    fn detect(&self) -> Result<Option<Arc<dyn PrivilegeEvaluator>>, StartupError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };
        let rules = AccessRules::load(path)?;
        Ok(Some(Arc::new(rules)))
    }
}
