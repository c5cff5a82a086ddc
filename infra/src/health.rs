//! Connectivity probes reported by the health endpoint

use async_trait::async_trait;

use crate::cache::RedisClient;
use crate::database::DatabasePool;

/// A dependency that can report whether it is reachable
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Name used as the key in the health report
    fn name(&self) -> &'static str;

    /// `Ok(())` when reachable, otherwise the failure detail for the log
    async fn check(&self) -> Result<(), String>;
}

#[async_trait]
impl HealthProbe for RedisClient {
    fn name(&self) -> &'static str {
        "session_store"
    }

    async fn check(&self) -> Result<(), String> {
        match self.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected PING reply".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[async_trait]
impl HealthProbe for DatabasePool {
    fn name(&self) -> &'static str {
        "user_directory"
    }

    async fn check(&self) -> Result<(), String> {
        match self.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected SELECT 1 result".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}
