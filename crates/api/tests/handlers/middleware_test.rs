use axum::extract::FromRequestParts;
use axum::http::Request;
use groomroute_api::middleware::error_handling::map_error;
use groomroute_api::middleware::tenant::{TenantId, ACCOUNT_ID_HEADER};
use groomroute_core::errors::GroomError;
use uuid::Uuid;

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = GroomError::NotFound("Resource not found".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = GroomError::Validation("Invalid input".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_policy() {
    // Policy violations (reorder on a past date, limits exceeded) map to 409
    let error = GroomError::Policy("Routes can only be reordered for today".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_authentication() {
    let error = GroomError::Authentication("Missing X-Account-Id header".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_database() {
    let error = GroomError::Database(eyre::eyre!("Database error"));

    let response = map_error(error);

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_tenant_extractor_reads_header() {
    let account_id = Uuid::new_v4();
    let request = Request::builder()
        .header(ACCOUNT_ID_HEADER, account_id.to_string())
        .body(())
        .unwrap();
    let (mut parts, _) = request.into_parts();

    let tenant = TenantId::from_request_parts(&mut parts, &()).await.unwrap();

    assert_eq!(tenant, TenantId(account_id));
}

#[tokio::test]
async fn test_tenant_extractor_rejects_missing_header() {
    let request = Request::builder().body(()).unwrap();
    let (mut parts, _) = request.into_parts();

    let result = TenantId::from_request_parts(&mut parts, &()).await;

    let err = result.expect_err("expected rejection");
    assert!(matches!(err.0, GroomError::Authentication(_)));
}

#[tokio::test]
async fn test_tenant_extractor_rejects_malformed_id() {
    let request = Request::builder()
        .header(ACCOUNT_ID_HEADER, "not-a-uuid")
        .body(())
        .unwrap();
    let (mut parts, _) = request.into_parts();

    let result = TenantId::from_request_parts(&mut parts, &()).await;

    let err = result.expect_err("expected rejection");
    assert!(matches!(err.0, GroomError::Authentication(_)));
}
