//! Handlers for the `/auth` resource (register, login, refresh, logout, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use leadflow_core::error::CoreError;
use leadflow_core::roles::ROLE_USER;
use leadflow_core::validation::{is_valid_email, MIN_USER_NAME_LENGTH};
use leadflow_db::models::session::CreateSession;
use leadflow_db::models::user::{CreateUser, User, UserResponse};
use leadflow_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Tokens plus the user they were issued to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let name = input.name.trim();
    let email = input.email.trim().to_lowercase();

    if name.chars().count() < MIN_USER_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "name must be at least {MIN_USER_NAME_LENGTH} characters"
        ))
        .into());
    }
    if !is_valid_email(&email) {
        return Err(CoreError::Validation("A valid email is required".into()).into());
    }
    validate_password_strength(&input.password).map_err(CoreError::Validation)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(CoreError::Conflict("Email is already registered".into()).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: name.to_string(),
            email,
            password_hash,
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    let response = create_auth_response(&state, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(response).with_message("User registered successfully")),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| CoreError::Unauthorized(INVALID_CREDENTIALS.into()))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
    }

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(
        ApiResponse::ok(response).with_message("Login successful"),
    ))
}

/// POST /api/auth/refresh
///
/// Exchange a refresh token for a new pair. The old session is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Invalid or expired refresh token".into()))?;

    // Rotation: a refresh token is good for one exchange.
    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(CoreError::Unauthorized("Invalid or expired refresh token".into()).into());
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("User no longer exists".into()))?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(ApiResponse::ok(response)))
}

/// POST /api/auth/logout
///
/// Revoke every session of the caller. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue an access token and a refresh session for `user`.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_token, refresh_token_hash) = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash,
            expires_at: jwt.refresh_expires_at(),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: jwt.access_expires_in(),
        user: UserResponse::from(user),
    })
}
