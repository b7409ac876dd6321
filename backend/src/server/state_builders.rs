//! Builder for the startup-selected security evaluator.

use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::error;

use hypermedia::domain::{SecurityEvaluator, SecurityEvaluatorFactory};
use hypermedia::outbound::access_rules::AccessRulesProbe;
use hypermedia::settings::ServerSettings;

/// Select the security evaluator for this process.
///
/// # Errors
/// Any [`hypermedia::domain::StartupError`] is logged and returned as an
/// [`io::Error`]; the process must not start with a half-configured
/// evaluator.
pub fn build_security(settings: &ServerSettings) -> io::Result<Arc<dyn SecurityEvaluator>> {
    let probe = AccessRulesProbe::new(settings.security_rules_path().map(Path::to_path_buf));
    SecurityEvaluatorFactory::default()
        .create(&probe)
        .map_err(|err| {
            error!(error = %err, "security evaluator construction failed");
            io::Error::other(err)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use hypermedia::domain::HttpMethod;
    use rstest::rstest;

    fn settings(security_rules_path: Option<PathBuf>) -> ServerSettings {
        ServerSettings {
            bind_addr: "127.0.0.1:0".to_owned(),
            security_rules_path,
        }
    }

    #[rstest]
    fn unconfigured_security_allows_everything() {
        let evaluator = build_security(&settings(None)).expect("permissive evaluator");

        assert!(evaluator.is_allowed("/books/1", HttpMethod::Delete));
    }

    #[rstest]
    fn unreadable_rules_file_stops_startup() {
        let missing = PathBuf::from("/nonexistent/hypermedia/rules.json");

        assert!(build_security(&settings(Some(missing))).is_err());
    }
}
