//! Auth API Handlers

use axum::extract::State;
use http::StatusCode;
use shared::models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, Role};

use crate::auth::password::{hash_password_async, verify_password_async};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, non_blank,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode, Json};

/// POST /api/register - create a customer (or admin) account
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let (Some(first_name), Some(last_name), Some(email), Some(phone)) = (
        non_blank(req.first_name.as_deref()),
        non_blank(req.last_name.as_deref()),
        non_blank(req.email.as_deref()),
        non_blank(req.phone.as_deref()),
    ) else {
        return Err(AppError::validation("All fields are required"));
    };
    let Some(password) = req.password.filter(|p| !p.is_empty()) else {
        return Err(AppError::validation("All fields are required"));
    };

    validate_required_text(&first_name, "firstName", MAX_NAME_LEN)?;
    validate_required_text(&last_name, "lastName", MAX_NAME_LEN)?;
    validate_required_text(&email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&password, "password", MAX_PASSWORD_LEN)?;

    let role = match non_blank(req.role.as_deref()) {
        Some(raw) => Role::parse(&raw)
            .ok_or_else(|| AppError::new(ErrorCode::InvalidRole).with_detail("role", raw))?,
        None => Role::default(),
    };

    let email = shared::util::normalize_email(&email);
    if user::email_exists(state.pool(), &email).await? {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
    }

    let hash_pass = hash_password_async(password).await?;
    let created = user::create(
        state.pool(),
        user::NewUser {
            first_name,
            last_name,
            email,
            hash_pass,
            phone,
            role,
        },
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailAlreadyRegistered),
        other => other.into(),
    })?;

    security_log!(
        "INFO",
        "user_registered",
        user_id = created.id,
        role = created.role.as_str()
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /api/login - exchange credentials for a one-hour token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (
        non_blank(req.email.as_deref()),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::validation("Email and password are required"));
    };

    let email = shared::util::normalize_email(&email);
    let Some(credentials) = user::find_credentials(state.pool(), &email).await? else {
        security_log!("WARN", "login_unknown_email", email = email.as_str());
        return Err(AppError::invalid_credentials());
    };

    if !verify_password_async(password, credentials.hash_pass).await {
        security_log!("WARN", "login_bad_password", user_id = credentials.user.id);
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .get_jwt_service()
        .generate_token(&credentials.user)
        .map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    security_log!("INFO", "login_success", user_id = credentials.user.id);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        role: credentials.user.role,
    }))
}
