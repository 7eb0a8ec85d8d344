use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};

use crate::AppState;
use crate::routes::common::{ApiResponse, error_response, success_response};

use super::model::{EmailUniqueQuery, RegisterUserRequest, UpdateUserRequest, UserData};

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> (StatusCode, axum::Json<ApiResponse<UserData>>) {
    match state.service.register(req).await {
        Ok(user) => (
            StatusCode::CREATED,
            success_response("user created", UserData::from(user)),
        ),
        Err(err) => error_response(err),
    }
}

#[axum::debug_handler]
pub async fn get_all(
    State(state): State<AppState>,
) -> (StatusCode, axum::Json<ApiResponse<Vec<UserData>>>) {
    match state.service.get_all().await {
        Ok(users) => (
            StatusCode::OK,
            success_response(
                "users retrieved",
                users.into_iter().map(UserData::from).collect(),
            ),
        ),
        Err(err) => error_response(err),
    }
}

#[axum::debug_handler]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> (StatusCode, axum::Json<ApiResponse<UserData>>) {
    match state.service.get_by_id(id).await {
        Ok(user) => (
            StatusCode::OK,
            success_response("user retrieved", UserData::from(user)),
        ),
        Err(err) => error_response(err),
    }
}

#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateUserRequest>,
) -> (StatusCode, axum::Json<ApiResponse<UserData>>) {
    match state.service.update(id, req).await {
        Ok(user) => (
            StatusCode::OK,
            success_response("user updated", UserData::from(user)),
        ),
        Err(err) => error_response(err),
    }
}

#[axum::debug_handler]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> (StatusCode, axum::Json<ApiResponse<bool>>) {
    match state.service.delete(id).await {
        Ok(deleted) => (StatusCode::OK, success_response("user deleted", deleted)),
        Err(err) => error_response(err),
    }
}

#[axum::debug_handler]
pub async fn email_unique(
    State(state): State<AppState>,
    Query(query): Query<EmailUniqueQuery>,
) -> (StatusCode, axum::Json<ApiResponse<bool>>) {
    match state.service.is_email_unique(&query.email).await {
        Ok(unique) => {
            let message = if unique {
                "email is available"
            } else {
                "email is already in use"
            };
            (StatusCode::OK, success_response(message, unique))
        }
        Err(err) => error_response(err),
    }
}
