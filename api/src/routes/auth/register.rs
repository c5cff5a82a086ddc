use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;

use sg_core::repositories::{SessionStore, UserDirectory};

use crate::app::AppState;
use crate::dto::auth_dto::{RegisterRequest, RegisterResponse};
use crate::handlers::error_handler::{error_response, handle_domain_error};

/// Handler for POST /auth/register
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "pw", "iin": "IIN123" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "id": 1, "message": "User 1 was created" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Empty input, or username / IIN already taken
pub async fn register<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Either<web::Json<RegisterRequest>, web::Form<RegisterRequest>>,
) -> HttpResponse
where
    U: UserDirectory + 'static,
    S: SessionStore + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        tracing::info!(?errors, "Registration input rejected");
        return error_response(StatusCode::BAD_REQUEST, "validation_error", "Input too long");
    }

    match state
        .auth_service
        .register(&request.username, &request.password, &request.iin)
        .await
    {
        Ok(identity) => HttpResponse::Ok().json(RegisterResponse {
            id: identity.value(),
            message: format!("User {} was created", identity),
        }),
        Err(error) => handle_domain_error(error),
    }
}
