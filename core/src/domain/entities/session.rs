//! Session data carried in the signed session cookie.
//!
//! Sessions are stateless: nothing is persisted server-side, so the signed
//! token is the single source of truth and the last-activity timestamp
//! inside it drives the idle-timeout state machine.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::{Account, AccountRole};

/// Ephemeral session data, created on login and destroyed on logout or
/// idle timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account the session belongs to
    pub account_id: Uuid,

    /// Account email at login time
    pub email: String,

    /// Account role at login time
    pub role: AccountRole,

    /// Verified flag at login time
    pub is_verified: bool,

    /// Display name
    pub name: String,

    /// Instant of the last observed activity
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session for an account that just logged in
    pub fn for_account(account: &Account) -> Self {
        Self {
            account_id: account.id,
            email: account.email.clone(),
            role: account.role,
            is_verified: account.is_verified,
            name: account.name.clone(),
            last_activity: Utc::now(),
        }
    }

    /// Time elapsed since the last observed activity
    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_activity
    }

    /// Refresh the last-activity timestamp
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }
}

/// Outcome of the session-activity check.
///
/// `Active` carries the session with its last-activity refreshed, ready to
/// be re-signed. `Expired` means the caller must delete both cookies and
/// treat the request as having no session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionActivity {
    Active(Session),
    Expired,
}

/// JWT claims encoding a [`Session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id (subject)
    pub sub: String,
    /// Account email
    pub email: String,
    /// Account role
    pub role: AccountRole,
    /// Verified flag
    pub verified: bool,
    /// Display name
    pub name: String,
    /// Last-activity instant (unix seconds)
    pub last_activity: i64,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds): last activity plus the idle timeout
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

impl SessionClaims {
    /// Build claims from a session, with expiry pinned to the idle window
    pub fn from_session(session: &Session, idle_timeout: Duration, issuer: &str) -> Self {
        let iat = Utc::now().timestamp();
        Self {
            sub: session.account_id.to_string(),
            email: session.email.clone(),
            role: session.role,
            verified: session.is_verified,
            name: session.name.clone(),
            last_activity: session.last_activity.timestamp(),
            iat,
            exp: session.last_activity.timestamp() + idle_timeout.num_seconds(),
            iss: issuer.to_string(),
        }
    }

    /// Reconstruct the session carried by these claims
    pub fn into_session(self) -> Result<Session, uuid::Error> {
        let account_id = Uuid::parse_str(&self.sub)?;
        let last_activity = Utc
            .timestamp_opt(self.last_activity, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Ok(Session {
            account_id,
            email: self.email,
            role: self.role,
            is_verified: self.verified,
            name: self.name,
            last_activity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account::new(
            "a@x.com".to_string(),
            "+61412345678".to_string(),
            "Alice".to_string(),
            "hashed".to_string(),
            "token".to_string(),
        )
    }

    #[test]
    fn test_session_from_account() {
        let mut account = sample_account();
        account.verify();
        let session = Session::for_account(&account);
        assert_eq!(session.account_id, account.id);
        assert_eq!(session.email, "a@x.com");
        assert!(session.is_verified);
    }

    #[test]
    fn test_idle_duration() {
        let account = sample_account();
        let mut session = Session::for_account(&account);
        let start = session.last_activity;
        assert!(session.idle_for(start + Duration::minutes(10)) == Duration::minutes(10));

        session.touch(start + Duration::minutes(10));
        assert_eq!(session.last_activity, start + Duration::minutes(10));
    }

    #[test]
    fn test_claims_round_trip() {
        let account = sample_account();
        let session = Session::for_account(&account);
        let claims = SessionClaims::from_session(&session, Duration::minutes(30), "edudesk");
        assert_eq!(claims.iss, "edudesk");
        assert_eq!(claims.exp, claims.last_activity + 1800);

        let restored = claims.into_session().unwrap();
        assert_eq!(restored.account_id, session.account_id);
        assert_eq!(restored.email, session.email);
        // timestamps survive at second precision
        assert_eq!(
            restored.last_activity.timestamp(),
            session.last_activity.timestamp()
        );
    }
}
