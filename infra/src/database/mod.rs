//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - The MySQL user directory

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::MySqlUserDirectory;
