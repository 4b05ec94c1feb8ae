//! Login response value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{AccountRole, Session};

/// Result of a successful login: the signed session token plus the
/// session fields the API layer needs for the cookies and the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    /// Signed session token, to be written into the session cookie
    pub session_token: String,

    /// Last-activity instant, to be written into the activity cookie
    pub last_activity: DateTime<Utc>,

    /// Account id
    pub account_id: Uuid,

    /// Account email
    pub email: String,

    /// Display name
    pub name: String,

    /// Account role
    pub role: AccountRole,
}

impl LoginResponse {
    /// Assemble a response from an issued token and its session
    pub fn new(session_token: String, session: &Session) -> Self {
        Self {
            session_token,
            last_activity: session.last_activity,
            account_id: session.account_id,
            email: session.email.clone(),
            name: session.name.clone(),
            role: session.role,
        }
    }
}
