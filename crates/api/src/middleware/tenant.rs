//! # Tenant Scoping Middleware
//!
//! Every request to the API operates on behalf of exactly one account. The
//! excluded authentication layer resolves the caller's session and forwards
//! the account id in the `X-Account-Id` header; this module extracts it and
//! hands handlers a typed [`TenantId`]. Handlers pass the id to every
//! repository call, so no query can cross the tenant boundary.

use axum::{extract::FromRequestParts, http::request::Parts};
use groomroute_core::errors::GroomError;
use uuid::Uuid;

use crate::middleware::error_handling::AppError;

/// Header carrying the authenticated account id.
pub const ACCOUNT_ID_HEADER: &str = "x-account-id";

/// The account on whose behalf the current request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantId(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ACCOUNT_ID_HEADER)
            .ok_or_else(|| {
                AppError(GroomError::Authentication(
                    "Missing X-Account-Id header".to_string(),
                ))
            })?;

        let value = header.to_str().map_err(|_| {
            AppError(GroomError::Authentication(
                "Invalid X-Account-Id header".to_string(),
            ))
        })?;

        let account_id = Uuid::parse_str(value).map_err(|_| {
            AppError(GroomError::Authentication(
                "Invalid X-Account-Id header".to_string(),
            ))
        })?;

        Ok(TenantId(account_id))
    }
}
