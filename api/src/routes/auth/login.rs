use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_core::errors::AuthError;
use sg_core::repositories::{SessionStore, UserDirectory};

use crate::app::AppState;
use crate::dto::auth_dto::{LoginRequest, TokenResponse};
use crate::handlers::error_handler::handle_domain_error;

/// Handler for POST /auth/login
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "pw" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "access": "eyJ...", "refresh": "eyJ...", "expires_in": 3600 }
/// ```
///
/// ## Errors
/// - 403 Forbidden: Unknown user or wrong password
/// - 503 Service Unavailable: Directory or session store unreachable
pub async fn login<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Either<web::Json<LoginRequest>, web::Form<LoginRequest>>,
) -> HttpResponse
where
    U: UserDirectory + 'static,
    S: SessionStore + 'static,
{
    let request = request.into_inner();

    if request.validate().is_err() {
        return handle_domain_error(AuthError::InvalidCredentials.into());
    }

    match state.auth_service.login(&request.username, &request.password).await {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
