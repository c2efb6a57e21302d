/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    extract::ValidJson,
    response::ApiResponse,
    state::AppState,
};
use axum::extract::State;
use serde::{Deserialize, Serialize};
use vidshare_core::UserProfile;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

fn invalid_credentials() -> ServerError {
    ServerError::Auth("Invalid username or password".to_string())
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>> {
    let user = app_state
        .db
        .get_user_by_username(req.username.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_hash = app_state
        .db
        .get_password_hash(&user.id)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        tracing::warn!("Failed login attempt for {}", user.username);
        return Err(invalid_credentials());
    }

    let access_token = app_state.auth_service.create_access_token(&user.id)?;
    let refresh_token = app_state.auth_service.create_refresh_token(&user.id)?;

    Ok(ApiResponse::ok(
        LoginResponse {
            user: UserProfile::from(&user),
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
        },
        "User logged in successfully",
    ))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    ValidJson(req): ValidJson<RefreshRequest>,
) -> Result<ApiResponse<RefreshResponse>> {
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)
        .map_err(|_| ServerError::Auth("Invalid or expired refresh token".to_string()))?;

    // Tokens outlive deleted accounts
    if app_state.db.get_user(&user_id).await?.is_none() {
        return Err(ServerError::Auth("Invalid or expired refresh token".to_string()));
    }

    let access_token = app_state.auth_service.create_access_token(&user_id)?;

    Ok(ApiResponse::ok(
        RefreshResponse {
            access_token,
            token_type: "Bearer".to_string(),
        },
        "Access token refreshed",
    ))
}
