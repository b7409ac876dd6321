//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the security meta endpoints and the schema wrappers
//! from [`crate::inbound::http::schemas`], which keep the domain types free of
//! utoipa derives. The document is served at `/api-docs/openapi.json` in debug
//! builds and exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, HttpMethodSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hypermedia API",
        description = "HAL responses and security meta queries.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::security::allowed_methods,
        crate::inbound::http::security::is_allowed,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema, HttpMethodSchema)),
    tags(
        (name = "security", description = "Which HTTP methods may be used on which paths")
    )
)]
pub struct ApiDoc;
