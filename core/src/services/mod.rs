//! Business services containing domain logic and use cases.

pub mod auth;
pub mod session;

// Re-export commonly used types
pub use auth::{
    AuthService, AuthServiceConfig, EmailServiceTrait, PasswordHasherTrait, generate_token,
};
pub use session::SessionService;
