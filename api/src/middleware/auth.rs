//! Bearer authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the access credential from the Authorization
//! header, validates it statelessly and injects the claims into the request.
//! Every failure ends the request with `403`.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use sg_core::{
    domain::entities::{token::ClaimSet, user::Identity},
    errors::TokenError,
    repositories::SessionStore,
    services::token::CredentialValidator,
};

use crate::handlers::not_authorized;

/// Authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Validated claims of the presented access credential
    pub claims: ClaimSet,
}

impl AuthContext {
    pub fn identity(&self) -> Identity {
        self.claims.identity()
    }
}

/// Stateless access credential check used by the middleware
pub trait AccessVerifier: Send + Sync {
    fn verify_access(&self, token: &str) -> Result<ClaimSet, TokenError>;
}

impl<S: SessionStore> AccessVerifier for CredentialValidator<S> {
    fn verify_access(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.validate_access(token)
    }
}

/// Bearer authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    verifier: Arc<dyn AccessVerifier>,
}

impl JwtAuth {
    pub fn new(verifier: Arc<dyn AccessVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

/// Bearer authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn AccessVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = self.verifier.clone();

        Box::pin(async move {
            let Some(token) = extract_bearer_token(&req) else {
                tracing::info!(path = %req.path(), "Missing or malformed Authorization header");
                return Ok(req.into_response(not_authorized()).map_into_right_body());
            };

            match verifier.verify_access(&token) {
                Ok(claims) => {
                    tracing::debug!(identity = %claims.identity(), "Access credential accepted");
                    req.extensions_mut().insert(AuthContext { claims });
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => {
                    tracing::info!(path = %req.path(), reason = e.code(), "Access credential rejected");
                    Ok(req.into_response(not_authorized()).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
pub fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| InternalError::from_response("Not authorized", not_authorized()).into());

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
