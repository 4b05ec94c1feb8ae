use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ed_core::domain::entities::{AccountRole, Session};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address or phone number
    #[validate(length(min = 1, max = 254))]
    pub identifier: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 16))]
    pub phone: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(equal = 32))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(equal = 32))]
    pub token: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Body of a successful login; the session token itself travels only in
/// the cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSuccessResponse {
    pub account_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: AccountRole,
    pub last_activity: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub account_id: Uuid,
    pub email: String,
    pub message: String,
}

/// Snapshot of the current session, returned by the session and refresh
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub account_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: AccountRole,
    pub is_verified: bool,
    pub last_activity: DateTime<Utc>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            account_id: session.account_id,
            email: session.email.clone(),
            name: session.name.clone(),
            role: session.role,
            is_verified: session.is_verified,
            last_activity: session.last_activity,
        }
    }
}
