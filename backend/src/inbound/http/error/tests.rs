//! Tests for HTTP error mapping.

use super::*;
use crate::domain::{ConfigurationError, EntityType, Error};
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::json;

async fn response_payload(error: &Error) -> (StatusCode, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (status, payload)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let err = Error::invalid_request("bad").with_details(json!({"field": "method"}));

    let (status, payload) = response_payload(&err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload, err);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let err = Error::internal("boom").with_details(json!({"secret": "x"}));

    let (status, payload) = response_payload(&err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn missing_projection_surfaces_as_redacted_server_error() {
    let err = Error::from(ConfigurationError::MissingBaseProjection {
        entity_type: EntityType::new("Book"),
    });

    let (status, payload) = response_payload(&err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload, Error::internal("Internal server error"));
}
