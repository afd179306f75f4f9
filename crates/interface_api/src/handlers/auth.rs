//! Identity handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use core_kernel::Actor;
use infra_db::repositories::users::NewUser;
use infra_db::{DatabaseError, UsersRepository};

use crate::auth::{create_token, hash_password, verify_password, AuthError};
use crate::dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Creates a user-role account
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    request.validate()?;

    let password_hash = hash_password(&request.password)?;
    let users = UsersRepository::new(state.pool.clone());

    let row = users
        .create(NewUser {
            full_name: request.full_name,
            email: request.email.to_lowercase(),
            password_hash,
        })
        .await
        .map_err(|e| match e {
            DatabaseError::DuplicateEntry(_) => {
                ApiError::Conflict("An account with this email already exists".to_string())
            }
            other => other.into(),
        })?;

    let Json(body) = ApiResponse::success(
        "Account created",
        RegisterResponse { user: row.into() },
    );
    Ok((StatusCode::CREATED, Json(body)))
}

/// Verifies credentials and issues a token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    request.validate()?;

    let users = UsersRepository::new(state.pool.clone());
    let row = users
        .find_by_email(&request.email.to_lowercase())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    verify_password(&request.password, &row.password_hash)?;

    let actor = Actor::new(row.id, row.role);
    let token = create_token(actor, &state.config.jwt_secret, state.config.jwt_expiration_secs)?;

    tracing::info!(user_id = %row.id, role = %row.role, "Login succeeded");

    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse {
            token,
            user: row.into(),
        },
    ))
}
