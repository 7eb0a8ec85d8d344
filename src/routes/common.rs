use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::service::user::ServiceError;

/// Uniform response envelope. Exactly one of `data` / `errors` carries
/// information, matching the `success` flag.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

pub fn success_response<T: Serialize>(message: &str, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: message.to_string(),
        data: Some(data),
        errors: Vec::new(),
    })
}

pub fn failure_response<T>(message: &str, errors: Vec<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: false,
        message: message.to_string(),
        data: None,
        errors,
    })
}

/// Maps service failures onto the transport contract. Business failures
/// keep their detail; infrastructure faults are logged here and rendered
/// opaque.
pub fn error_response<T>(err: ServiceError) -> (StatusCode, Json<ApiResponse<T>>) {
    match err {
        ServiceError::Validation(errors) => (
            StatusCode::BAD_REQUEST,
            failure_response("validation error", errors),
        ),
        ServiceError::EmailTaken(_) => (
            StatusCode::CONFLICT,
            failure_response("conflict", vec![err.to_string()]),
        ),
        ServiceError::Authentication => (
            StatusCode::UNAUTHORIZED,
            failure_response("authentication error", vec![err.to_string()]),
        ),
        ServiceError::UserNotFound => (
            StatusCode::NOT_FOUND,
            failure_response("not found", vec![err.to_string()]),
        ),
        ServiceError::Store(ref cause) => {
            tracing::error!(error = %cause, "store failure");
            internal_error_response()
        }
        ServiceError::Hash(ref cause) => {
            tracing::error!(error = %cause, "credential hashing failure");
            internal_error_response()
        }
        ServiceError::Token(ref cause) => {
            tracing::error!(error = %cause, "token issuance failure");
            internal_error_response()
        }
    }
}

pub fn internal_error_response<T>() -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        failure_response(
            "internal server error",
            vec!["internal server error".to_string()],
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_errors() {
        let Json(body) = success_response("user created", 7);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 7);
        assert!(value.get("errors").is_none());
    }

    #[test]
    fn failure_envelope_omits_data() {
        let Json(body) =
            failure_response::<()>("validation error", vec!["email is required".to_string()]);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("data").is_none());
        assert_eq!(value["errors"][0], "email is required");
    }

    #[test]
    fn infrastructure_faults_do_not_leak_detail() {
        let err = ServiceError::Token(crate::auth::token::TokenError::Configuration(
            "signing secret is empty",
        ));
        let (status, Json(body)) = error_response::<()>(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.errors.iter().any(|e| e.contains("secret")));
    }

    #[test]
    fn business_failures_map_to_their_status_codes() {
        let cases = [
            (
                ServiceError::Validation(vec!["x".to_string()]),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::EmailTaken("a@x.com".to_string()),
                StatusCode::CONFLICT,
            ),
            (ServiceError::Authentication, StatusCode::UNAUTHORIZED),
            (ServiceError::UserNotFound, StatusCode::NOT_FOUND),
        ];
        for (err, expected) in cases {
            let (status, _) = error_response::<()>(err);
            assert_eq!(status, expected);
        }
    }
}
