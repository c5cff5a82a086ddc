use actix_web::{web, HttpResponse};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use sg_core::repositories::{SessionStore, UserDirectory};
use sg_shared::{HealthResponse, HealthStatus, ServiceHealth};

use crate::app::AppState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Reported for any failed dependency; the reason is only logged
const UNREACHABLE: &str = "unreachable";

/// Handler for GET /health
///
/// Pings every registered dependency. `200` when all respond, otherwise `503`.
/// Failure details go to the log, never into the response.
pub async fn health_check<U, S>(state: web::Data<AppState<U, S>>) -> HttpResponse
where
    U: UserDirectory + 'static,
    S: SessionStore + 'static,
{
    let mut services = HashMap::new();

    for probe in &state.probes {
        let started = Instant::now();
        let outcome = match tokio::time::timeout(PROBE_TIMEOUT, probe.check()).await {
            Ok(result) => result,
            Err(_) => Err("probe timed out".to_string()),
        };
        let elapsed = started.elapsed().as_millis() as u64;

        let health = match outcome {
            Ok(()) => ServiceHealth {
                status: HealthStatus::Healthy,
                message: None,
                response_time_ms: Some(elapsed),
            },
            Err(reason) => {
                tracing::warn!(dependency = probe.name(), %reason, "Health probe failed");
                ServiceHealth {
                    status: HealthStatus::Unhealthy,
                    message: Some(UNREACHABLE.to_string()),
                    response_time_ms: Some(elapsed),
                }
            }
        };
        services.insert(probe.name().to_string(), health);
    }

    let report = HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"));
    match report.status {
        HealthStatus::Healthy => HttpResponse::Ok().json(report),
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(report),
    }
}
