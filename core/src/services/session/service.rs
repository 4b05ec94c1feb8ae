//! Session token signing, verification and idle-timeout enforcement

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use ed_shared::config::SessionConfig;

use crate::domain::entities::{Account, Session, SessionActivity, SessionClaims};
use crate::errors::{DomainError, TokenError};

/// Service managing the signed, stateless session tokens.
///
/// There is no server-side revocation list: the token itself is the
/// session, and the last-activity claim inside it bounds its useful life.
pub struct SessionService {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionService {
    /// Create a new session service from configuration
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Idle timeout after which a session is force-expired
    pub fn idle_timeout(&self) -> Duration {
        Duration::seconds(self.config.idle_timeout_seconds)
    }

    /// Issue a fresh session for an account that just authenticated.
    ///
    /// Returns the signed token together with the session it encodes; the
    /// API layer writes the token cookie and the last-activity cookie from
    /// these.
    pub fn issue(&self, account: &Account) -> Result<(String, Session), DomainError> {
        let session = Session::for_account(account);
        let token = self.sign(&session)?;
        Ok((token, session))
    }

    /// Sign a session into a token
    pub fn sign(&self, session: &Session) -> Result<String, DomainError> {
        let claims = SessionClaims::from_session(session, self.idle_timeout(), &self.config.issuer);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verify a token and recover the session it carries.
    ///
    /// Malformed, tampered or expired tokens all surface as token errors;
    /// the caller treats any of them as "no session" and clears the
    /// cookies.
    pub fn verify(&self, token: &str) -> Result<Session, DomainError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Token(TokenError::TokenExpired)
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    DomainError::Token(TokenError::InvalidSignature)
                }
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            },
        )?;

        data.claims
            .into_session()
            .map_err(|_| DomainError::Token(TokenError::InvalidTokenFormat))
    }

    /// Run the activity check for a verified session.
    ///
    /// Within the idle window the session comes back `Active` with its
    /// last-activity refreshed, ready to be re-signed; beyond it the
    /// session is `Expired` and the caller must force a logout.
    pub fn check_activity(&self, mut session: Session, now: DateTime<Utc>) -> SessionActivity {
        if session.idle_for(now) > self.idle_timeout() {
            debug!(
                account_id = %session.account_id,
                idle_seconds = session.idle_for(now).num_seconds(),
                "session idle timeout exceeded"
            );
            return SessionActivity::Expired;
        }
        session.touch(now);
        SessionActivity::Active(session)
    }

    /// Re-sign a session with a refreshed last-activity timestamp.
    ///
    /// Convenience for the explicit refresh endpoint; returns the new
    /// token and the refreshed session, or `Expired` if the idle window
    /// has already passed.
    pub fn refresh(
        &self,
        session: Session,
        now: DateTime<Utc>,
    ) -> Result<Option<(String, Session)>, DomainError> {
        match self.check_activity(session, now) {
            SessionActivity::Active(refreshed) => {
                let token = self.sign(&refreshed)?;
                Ok(Some((token, refreshed)))
            }
            SessionActivity::Expired => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SessionService {
        SessionService::new(SessionConfig::new("test-secret"))
    }

    fn verified_account() -> Account {
        let mut account = Account::new(
            "a@x.com".to_string(),
            "+61412345678".to_string(),
            "Alice".to_string(),
            "hashed".to_string(),
            "token".to_string(),
        );
        account.verify();
        account
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = service();
        let account = verified_account();

        let (token, session) = service.issue(&account).unwrap();
        let recovered = service.verify(&token).unwrap();

        assert_eq!(recovered.account_id, session.account_id);
        assert_eq!(recovered.email, "a@x.com");
        assert!(recovered.is_verified);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = service();
        let (token, _) = service.issue(&verified_account()).unwrap();

        let mut tampered = token.clone();
        tampered.push('x');
        let result = service.verify(&tampered);
        assert!(matches!(result, Err(DomainError::Token(_))));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let service = service();
        let other = SessionService::new(SessionConfig::new("other-secret"));
        let (token, _) = other.issue(&verified_account()).unwrap();

        let result = service.verify(&token);
        assert!(matches!(
            result,
            Err(DomainError::Token(TokenError::InvalidSignature))
        ));
    }

    #[test]
    fn test_garbage_token_is_invalid_format() {
        let service = service();
        let result = service.verify("not-a-token");
        assert!(matches!(
            result,
            Err(DomainError::Token(TokenError::InvalidTokenFormat))
        ));
    }

    #[test]
    fn test_activity_within_window_refreshes() {
        let service = service();
        let (_, session) = service.issue(&verified_account()).unwrap();
        let started = session.last_activity;

        let now = started + Duration::minutes(29);
        match service.check_activity(session, now) {
            SessionActivity::Active(refreshed) => {
                assert_eq!(refreshed.last_activity, now);
            }
            SessionActivity::Expired => panic!("session should still be active"),
        }
    }

    #[test]
    fn test_activity_beyond_window_expires() {
        let service = service();
        let (_, session) = service.issue(&verified_account()).unwrap();
        let now = session.last_activity + Duration::minutes(31);

        assert_eq!(service.check_activity(session, now), SessionActivity::Expired);
    }

    #[test]
    fn test_refresh_returns_new_token_while_active() {
        let service = service();
        let (token, session) = service.issue(&verified_account()).unwrap();

        let now = session.last_activity + Duration::minutes(10);
        let refreshed = service.refresh(session, now).unwrap();
        let (new_token, new_session) = refreshed.expect("session should refresh");
        assert_ne!(new_token, token);
        assert_eq!(new_session.last_activity, now);

        // the refreshed token verifies
        assert!(service.verify(&new_token).is_ok());
    }

    #[test]
    fn test_refresh_after_timeout_yields_none() {
        let service = service();
        let (_, session) = service.issue(&verified_account()).unwrap();

        let now = session.last_activity + Duration::minutes(31);
        assert!(service.refresh(session, now).unwrap().is_none());
    }
}
