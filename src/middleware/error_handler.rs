use axum::{
    body::{Body, to_bytes},
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use tracing::error;

const LOGGED_BODY_LIMIT: usize = 16 * 1024;

/// Captures 5xx response bodies for the server log before passing them on.
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, LOGGED_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(%err, "failed to read error response body");
            return Response::from_parts(parts, Body::empty());
        }
    };

    error!(
        status = %parts.status,
        body = %String::from_utf8_lossy(&bytes),
        "server error response"
    );

    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
