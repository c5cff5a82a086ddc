use actix_web::{http::header::LOCATION, web, HttpResponse};

use sg_core::repositories::{SessionStore, UserDirectory};

use crate::app::AppState;
use crate::dto::auth_dto::{RenewRequest, TokenResponse};
use crate::handlers::error_handler::handle_domain_error;

/// Where clients are sent when their renewal credential is refused
pub const LOGIN_PATH: &str = "/auth/login";

/// Handler for POST /auth/renew
///
/// Exchanges the live renewal credential for a new pair. The presented
/// credential stops working as soon as the new one is stored.
///
/// # Request Body
///
/// ```json
/// { "refresh": "eyJ..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// Same body as login.
///
/// ## Errors
/// - 303 See Other to `/auth/login`: Credential rejected for any reason,
///   including a missing or unreadable body
/// - 503 Service Unavailable: Session store or directory unreachable
pub async fn renew<U, S>(
    state: web::Data<AppState<U, S>>,
    request: Result<web::Either<web::Json<RenewRequest>, web::Form<RenewRequest>>, actix_web::Error>,
) -> HttpResponse
where
    U: UserDirectory + 'static,
    S: SessionStore + 'static,
{
    // An unreadable body is a refused renewal like any other
    let request = match request {
        Ok(request) => request.into_inner(),
        Err(error) => {
            tracing::info!(%error, "Unreadable renewal request, redirecting to login");
            return redirect_to_login();
        }
    };

    match state.auth_service.renew(&request.refresh).await {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) if error.is_credential_rejection() => {
            tracing::info!(%error, "Renewal refused, redirecting to login");
            redirect_to_login()
        }
        Err(error) => handle_domain_error(error),
    }
}

fn redirect_to_login() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, LOGIN_PATH))
        .finish()
}
