//! Maps domain errors onto HTTP responses
//!
//! Every rejected credential looks the same to the client; the specific
//! reason is only logged. Infrastructure failures surface as a generic
//! server error.

use actix_web::{http::StatusCode, HttpResponse};
use sg_core::errors::{AuthError, DomainError, TokenError};
use sg_shared::ErrorResponse;

/// Build a JSON error body with the given status
pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(error, message))
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Token(token_error) => match token_error {
            TokenError::IssuanceFailed { reason } => {
                tracing::error!(%reason, "Credential issuance failed");
                internal_error()
            }
            rejected => {
                tracing::info!(reason = rejected.code(), "Credential rejected");
                not_authorized()
            }
        },
        DomainError::Auth(auth_error) => {
            tracing::info!(reason = auth_error.code(), "Request rejected");
            match auth_error {
                AuthError::InvalidCredentials => {
                    error_response(StatusCode::FORBIDDEN, "invalid_credentials", "Invalid auth")
                }
                AuthError::AlreadyExists => error_response(
                    StatusCode::BAD_REQUEST,
                    "already_exists",
                    "Username or IIN was already taken",
                ),
                AuthError::MissingField { field } => error_response(
                    StatusCode::BAD_REQUEST,
                    "missing_field",
                    format!("Got empty input: {}", field),
                ),
                AuthError::InsufficientPermissions => {
                    error_response(StatusCode::FORBIDDEN, "forbidden", "Admin access required")
                }
            }
        }
        DomainError::Validation { message } => {
            error_response(StatusCode::BAD_REQUEST, "validation_error", message)
        }
        DomainError::NotFound { resource } => {
            tracing::debug!(%resource, "Resource not found");
            error_response(
                StatusCode::NOT_FOUND,
                "not_found",
                "The requested resource was not found",
            )
        }
        DomainError::StoreUnavailable { message } | DomainError::DirectoryUnavailable { message } => {
            tracing::error!(%message, "Dependency unavailable");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                "Service temporarily unavailable",
            )
        }
        DomainError::Internal { message } => {
            tracing::error!(%message, "Internal error");
            internal_error()
        }
    }
}

/// Uniform response for any rejected credential
pub fn not_authorized() -> HttpResponse {
    error_response(StatusCode::FORBIDDEN, "not_authorized", "Not authorized")
}

fn internal_error() -> HttpResponse {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "An internal error occurred",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rejections_are_uniform() {
        for error in [
            TokenError::Malformed,
            TokenError::BadSignature,
            TokenError::Expired,
            TokenError::SessionNotFound,
        ] {
            let response = handle_domain_error(error.into());
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
        }
    }

    #[test]
    fn test_auth_error_statuses() {
        let cases = [
            (AuthError::InvalidCredentials, StatusCode::FORBIDDEN),
            (AuthError::AlreadyExists, StatusCode::BAD_REQUEST),
            (
                AuthError::MissingField { field: "iin".to_string() },
                StatusCode::BAD_REQUEST,
            ),
            (AuthError::InsufficientPermissions, StatusCode::FORBIDDEN),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(error.into()).status(), status);
        }
    }

    #[test]
    fn test_infrastructure_errors_are_generic() {
        let store = DomainError::StoreUnavailable { message: "redis down".to_string() };
        let directory = DomainError::DirectoryUnavailable { message: "mysql down".to_string() };
        let issuance = DomainError::Token(TokenError::IssuanceFailed { reason: "encode".to_string() });

        assert_eq!(handle_domain_error(store).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(handle_domain_error(directory).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(handle_domain_error(issuance).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found() {
        let error = DomainError::NotFound { resource: "user 9".to_string() };
        assert_eq!(handle_domain_error(error).status(), StatusCode::NOT_FOUND);
    }
}
