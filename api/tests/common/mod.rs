//! Shared setup for the HTTP tests: the real application over the in-memory
//! session store and user directory.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::{http::header::AUTHORIZATION, test, web};

use sg_api::AppState;
use sg_core::repositories::{InMemorySessionStore, InMemoryUserDirectory};
use sg_core::services::{auth::AuthService, token::CredentialConfig};
use sg_infra::HealthProbe;
use sg_shared::ClaimsMode;

pub type TestState = AppState<InMemoryUserDirectory, InMemorySessionStore>;

pub struct Harness {
    pub directory: Arc<InMemoryUserDirectory>,
    pub store: Arc<InMemorySessionStore>,
    pub state: web::Data<TestState>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_mode(ClaimsMode::ProfileSnapshot)
    }

    pub fn with_mode(mode: ClaimsMode) -> Self {
        Self::build(mode, Vec::new())
    }

    pub fn with_probes(probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        Self::build(ClaimsMode::ProfileSnapshot, probes)
    }

    fn build(mode: ClaimsMode, probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let store = Arc::new(InMemorySessionStore::new());
        let config = CredentialConfig::new("http-access-secret", "http-refresh-secret")
            .with_ttls(Duration::from_secs(900), Duration::from_secs(86400))
            .with_claims_mode(mode);
        let service = AuthService::new(config, directory.clone(), store.clone())
            .expect("test configuration is valid");

        let state = probes
            .into_iter()
            .fold(AppState::new(Arc::new(service)), |state, probe| state.with_probe(probe));

        Self {
            directory,
            store,
            state: web::Data::new(state),
        }
    }
}

pub fn register_request(username: &str, password: &str, iin: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/auth/register")
        .set_json(serde_json::json!({ "username": username, "password": password, "iin": iin }))
}

pub fn login_request(username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/auth/login")
        .set_json(serde_json::json!({ "username": username, "password": password }))
}

pub fn renew_request(refresh: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/auth/renew")
        .set_json(serde_json::json!({ "refresh": refresh }))
}

pub fn get_with_bearer(uri: &str, access: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(uri)
        .insert_header((AUTHORIZATION, format!("Bearer {}", access)))
}

/// Initialise the full application for a harness
macro_rules! init_app {
    ($harness:expr) => {
        actix_web::test::init_service(sg_api::create_app(
            $harness.state.clone(),
            &sg_shared::CorsConfig::development(),
        ))
        .await
    };
}

/// Register then log in, evaluating to `(access, refresh)`
macro_rules! register_and_login {
    ($app:expr, $username:expr, $iin:expr) => {{
        let resp = actix_web::test::call_service(
            &$app,
            $crate::common::register_request($username, "pw", $iin).to_request(),
        )
        .await;
        assert!(resp.status().is_success(), "register failed: {}", resp.status());

        let body: serde_json::Value = actix_web::test::call_and_read_body_json(
            &$app,
            $crate::common::login_request($username, "pw").to_request(),
        )
        .await;
        (
            body["access"].as_str().expect("access token").to_string(),
            body["refresh"].as_str().expect("refresh token").to_string(),
        )
    }};
}
