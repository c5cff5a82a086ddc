//! Cache module for Redis-backed session storage

pub mod redis_client;
pub mod session_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;
