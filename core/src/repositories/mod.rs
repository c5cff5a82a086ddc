pub mod session;
pub mod user;

pub use session::{InMemorySessionStore, SessionStore};
pub use user::{InMemoryUserDirectory, UserDirectory};
