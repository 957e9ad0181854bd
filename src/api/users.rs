//! HTTP handlers for `/api/users`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::app::AppState;
use crate::domain::{AppError, CountResponse, CreateUserRequest, UpdateUserRequest, User};

use super::error::write_error;

pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.user_service.get_all_users().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    state
        .user_service
        .get_user(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("user not found with id: {id}")))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.user_service.create_user(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    state
        .user_service
        .update_user(id, &payload)
        .await
        .map(Json)
        .map_err(write_error)
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.user_service.delete_user(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("user not found with id: {id}")))
    }
}

pub async fn count_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.user_service.count_users().await?;
    Ok(Json(CountResponse { count }))
}
