//! User profile handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::{CreateUserRequest, CreateUserResponse, UserListQuery, UserResponse};
use crate::error::HttpError;
use crate::extract::{Json, Query};
use crate::state::AppState;

/// Create a profile without touching the identity provider.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), HttpError> {
    let user = state
        .core
        .users()
        .create(&req.name, &req.email, req.role)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            status: "success",
            message: "User created successfully",
            user_id: user.id,
        }),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserResponse>>, HttpError> {
    let users = state.core.users().list(query.limit).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, HttpError> {
    Ok(Json(state.core.users().get(&id).await?.into()))
}
