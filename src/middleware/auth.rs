use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;
use crate::auth::token::TokenError;
use crate::routes::common::{failure_response, internal_error_response};

/// Gate for the protected routes: requires a valid bearer token and makes
/// its claims available to handlers as a request extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return unauthorized();
    };

    match state.tokens.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(TokenError::Configuration(reason)) => {
            tracing::error!(reason, "token verification misconfigured");
            internal_error_response::<()>().into_response()
        }
        Err(_) => unauthorized(),
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        failure_response::<()>(
            "authentication error",
            vec!["missing or invalid bearer token".to_string()],
        ),
    )
        .into_response()
}
