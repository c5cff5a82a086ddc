//! Authentication route handlers
//!
//! - Login with username and password
//! - Registration
//! - Credential renewal

pub mod login;
pub mod register;
pub mod renew;

pub use login::login;
pub use register::register;
pub use renew::renew;
