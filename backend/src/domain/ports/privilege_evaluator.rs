//! Port onto the strict security configuration.

use crate::domain::HttpMethod;

/// Answers single access decisions on behalf of a security configuration.
///
/// This is the handle the strict security evaluator is constructed from; the
/// permissive evaluator never consults one.
#[cfg_attr(test, mockall::automock)]
pub trait PrivilegeEvaluator: Send + Sync {
    /// Whether `method` may be invoked on `path`.
    fn is_allowed(&self, path: &str, method: HttpMethod) -> bool;
}
