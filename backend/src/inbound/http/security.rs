//! Security meta endpoints.
//!
//! ```text
//! GET /meta/security/allowedMethods?path=/books      -> ["GET", ...]
//! GET /meta/security/isAllowed?path=/books&method=GET -> true
//! ```
//!
//! Both answer from the evaluator chosen at startup. Method names are matched
//! case-insensitively; names outside `GET, POST, PUT, PATCH, DELETE` are a bad
//! request.

use std::collections::BTreeSet;

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::{Error, HttpMethod};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, HttpMethodSchema};
use crate::inbound::http::state::HttpState;

/// Path prefix of the security meta endpoints.
pub const SECURITY_META_SCOPE: &str = "/meta/security";

/// Query for [`allowed_methods`].
#[derive(Debug, Deserialize, IntoParams)]
pub struct AllowedMethodsQuery {
    /// Request path to evaluate.
    pub path: String,
}

/// Query for [`is_allowed`].
#[derive(Debug, Deserialize, IntoParams)]
pub struct IsAllowedQuery {
    /// Request path to evaluate.
    pub path: String,
    /// HTTP method name, case-insensitive.
    pub method: String,
}

fn parse_method(raw: &str) -> Result<HttpMethod, Error> {
    raw.parse::<HttpMethod>().map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "method",
            "value": raw,
            "code": "unsupported_method",
        }))
    })
}

/// List the HTTP methods allowed on a path.
#[utoipa::path(
    get,
    path = "/meta/security/allowedMethods",
    params(AllowedMethodsQuery),
    responses(
        (status = 200, description = "Allowed methods", body = [HttpMethodSchema]),
        (status = 400, description = "Missing path", body = ErrorSchema)
    ),
    tags = ["security"],
    operation_id = "allowedMethods"
)]
#[get("/allowedMethods")]
pub async fn allowed_methods(
    state: web::Data<HttpState>,
    query: web::Query<AllowedMethodsQuery>,
) -> ApiResult<HttpResponse> {
    let methods: BTreeSet<HttpMethod> = state.security.allowed_methods(&query.path);
    Ok(HttpResponse::Ok().json(methods))
}

/// Check whether a method is allowed on a path.
#[utoipa::path(
    get,
    path = "/meta/security/isAllowed",
    params(IsAllowedQuery),
    responses(
        (status = 200, description = "Whether the call is allowed", body = bool),
        (status = 400, description = "Unknown method or missing parameter", body = ErrorSchema)
    ),
    tags = ["security"],
    operation_id = "isAllowed"
)]
#[get("/isAllowed")]
pub async fn is_allowed(
    state: web::Data<HttpState>,
    query: web::Query<IsAllowedQuery>,
) -> ApiResult<HttpResponse> {
    let method = parse_method(&query.method)?;
    Ok(HttpResponse::Ok().json(state.security.is_allowed(&query.path, method)))
}

/// Mount both endpoints under [`SECURITY_META_SCOPE`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(SECURITY_META_SCOPE)
            .service(allowed_methods)
            .service(is_allowed),
    );
}
