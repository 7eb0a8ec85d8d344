use axum::{
    extract::{Json, State},
    http::StatusCode,
};

use crate::AppState;
use crate::routes::common::{ApiResponse, error_response, success_response};

use super::model::{LoginRequest, LoginResponse, LoginUserData};

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, axum::Json<ApiResponse<LoginResponse>>) {
    match state.service.login(req).await {
        Ok(outcome) => {
            let role = outcome.user.role.clone();
            let response = LoginResponse {
                user: LoginUserData::from(outcome.user),
                role,
                token: outcome.token,
            };
            (StatusCode::OK, success_response("login successful", response))
        }
        Err(err) => error_response(err),
    }
}
