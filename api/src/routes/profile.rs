use actix_web::{web, HttpResponse};

use sg_core::repositories::{SessionStore, UserDirectory};

use crate::app::AppState;
use crate::dto::auth_dto::UserResponse;
use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for GET /profile
///
/// Returns the caller's current directory record.
///
/// ## Errors
/// - 403 Forbidden: Missing or rejected access credential
/// - 404 Not Found: The record no longer exists
pub async fn profile<U, S>(state: web::Data<AppState<U, S>>, auth: AuthContext) -> HttpResponse
where
    U: UserDirectory + 'static,
    S: SessionStore + 'static,
{
    match state.auth_service.profile(auth.identity()).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(error),
    }
}
