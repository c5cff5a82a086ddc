use actix_web::{http::StatusCode, web, HttpResponse};

use sg_core::domain::entities::user::Identity;
use sg_core::repositories::{SessionStore, UserDirectory};

use crate::app::AppState;
use crate::dto::auth_dto::UserResponse;
use crate::handlers::error_handler::{error_response, handle_domain_error};
use crate::middleware::auth::AuthContext;

/// Handler for GET /user/{id}
///
/// Admin-only lookup of any directory record.
///
/// ## Errors
/// - 400 Bad Request: Non-numeric id
/// - 403 Forbidden: Caller is not an admin
/// - 404 Not Found: Unknown id
pub async fn user_by_id<U, S>(
    state: web::Data<AppState<U, S>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserDirectory + 'static,
    S: SessionStore + 'static,
{
    let Ok(identity) = path.into_inner().parse::<Identity>() else {
        return error_response(StatusCode::BAD_REQUEST, "invalid_id", "User id must be an integer");
    };

    match state.auth_service.user_by_id(&auth.claims, identity).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(error),
    }
}
