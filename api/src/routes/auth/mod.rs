//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints:
//! - Login / logout with the session cookie pair
//! - Session inspection and explicit refresh
//! - Signup and email verification
//! - Password-reset request and redemption

pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod reset_password;
pub mod session;
pub mod signup;
pub mod verify_email;

pub use login::AppState;
