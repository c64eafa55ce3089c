//! JWT Extractors
//!
//! - [`CurrentUser`]: a valid bearer token is required (401 otherwise)
//! - [`AdminUser`]: additionally requires the admin role (403 otherwise)
//! - `Option<CurrentUser>`: anonymous without an `Authorization` header,
//!   401 when a header is present but does not verify

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::request::Parts;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, ErrorCode};

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Already verified earlier in this request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header).ok_or_else(|| {
                security_log!("WARN", "auth_malformed_header", uri = parts.uri.to_string());
                AppError::invalid_token("Invalid token")
            })?,
            None => {
                security_log!("WARN", "auth_missing", uri = parts.uri.to_string());
                return Err(AppError::unauthorized());
            }
        };

        let jwt_service = state.get_jwt_service();
        match jwt_service.validate_token(token) {
            Ok(claims) => {
                let user = CurrentUser::try_from(claims).map_err(|e| {
                    security_log!("WARN", "auth_bad_claims", error = e.clone());
                    AppError::invalid_token("Invalid token")
                })?;

                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    error = e.to_string(),
                    uri = parts.uri.to_string()
                );

                match e {
                    JwtError::ExpiredToken => Err(AppError::token_expired()),
                    _ => Err(AppError::invalid_token("Invalid token")),
                }
            }
        }
    }
}

impl OptionalFromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(http::header::AUTHORIZATION) {
            return Ok(None);
        }
        <CurrentUser as FromRequestParts<ServerState>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}

/// Authenticated caller with the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl FromRequestParts<ServerState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let user =
            <CurrentUser as FromRequestParts<ServerState>>::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            security_log!(
                "WARN",
                "admin_required",
                user_id = user.id,
                user_role = user.role.as_str(),
                uri = parts.uri.to_string()
            );
            return Err(AppError::new(ErrorCode::AdminRequired));
        }
        Ok(AdminUser(user))
    }
}
