pub mod error_handler;

pub use error_handler::{error_response, handle_domain_error, not_authorized};
