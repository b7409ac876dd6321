//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use hypermedia::domain::SecurityEvaluator;

/// Everything the server needs once startup decisions are made.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) security: Arc<dyn SecurityEvaluator>,
}

impl ServerConfig {
    /// Bundle the bind address with the startup-selected evaluator.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, security: Arc<dyn SecurityEvaluator>) -> Self {
        Self {
            bind_addr,
            security,
        }
    }
}
