//! Application state and factory
//!
//! This module holds the shared state handed to every handler and builds the
//! Actix-web application with its routes and middleware.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use sg_core::repositories::{SessionStore, UserDirectory};
use sg_core::services::auth::AuthService;
use sg_infra::HealthProbe;
use sg_shared::{CorsConfig, ErrorResponse};

use crate::middleware::{auth::AccessVerifier, cors::create_cors, JwtAuth};
use crate::routes::{auth, health::health_check, profile::profile, users::user_by_id};

/// Application state that holds shared services
pub struct AppState<U: UserDirectory, S: SessionStore> {
    pub auth_service: Arc<AuthService<U, S>>,
    /// Dependencies reported by `/health`
    pub probes: Vec<Arc<dyn HealthProbe>>,
}

impl<U: UserDirectory, S: SessionStore> AppState<U, S> {
    pub fn new(auth_service: Arc<AuthService<U, S>>) -> Self {
        Self {
            auth_service,
            probes: Vec::new(),
        }
    }

    pub fn with_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.push(probe);
        self
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, S>(
    app_state: web::Data<AppState<U, S>>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserDirectory + 'static,
    S: SessionStore + 'static,
{
    let verifier: Arc<dyn AccessVerifier> = app_state.auth_service.validator();
    let jwt_auth = JwtAuth::new(verifier);

    App::new()
        .app_data(app_state)
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<U, S>))
        .service(
            web::scope("/auth")
                .route("/login", web::post().to(auth::login::<U, S>))
                .route("/register", web::post().to(auth::register::<U, S>))
                .route("/renew", web::post().to(auth::renew::<U, S>))
                // Older clients post renewals here
                .route("/update", web::post().to(auth::renew::<U, S>)),
        )
        .service(
            web::resource("/profile")
                .wrap(jwt_auth.clone())
                .route(web::get().to(profile::<U, S>)),
        )
        .service(
            web::resource("/user/{id}")
                .wrap(jwt_auth)
                .route(web::get().to(user_by_id::<U, S>)),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
