//! MySQL implementation of the AccountRepository trait.
//!
//! Persistence for the account record, including the lockout counter. The
//! failed-attempt increment and the lock transition happen inside a single
//! UPDATE statement, so two racing failed attempts can never under-count
//! toward the lockout threshold.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ed_core::domain::entities::account::{Account, AccountRole};
use ed_core::errors::DomainError;
use ed_core::repositories::AccountRepository;

const ACCOUNT_COLUMNS: &str = r#"
    id, email, phone, name, password_hash, role,
    is_verified, verification_token,
    failed_attempts, locked_until,
    reset_token, reset_token_expires_at,
    registration_complete, created_at, updated_at, last_login_at
"#;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn internal(context: &str, e: impl std::fmt::Display) -> DomainError {
        DomainError::Internal {
            message: format!("{context}: {e}"),
        }
    }

    /// Convert a database row to an Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| Self::internal("Failed to get id", e))?;

        let role_str: String = row
            .try_get("role")
            .map_err(|e| Self::internal("Failed to get role", e))?;
        let role = match role_str.as_str() {
            "admin" => AccountRole::Admin,
            _ => AccountRole::Staff,
        };

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| Self::internal("Invalid account UUID", e))?,
            email: row
                .try_get("email")
                .map_err(|e| Self::internal("Failed to get email", e))?,
            phone: row
                .try_get("phone")
                .map_err(|e| Self::internal("Failed to get phone", e))?,
            name: row
                .try_get("name")
                .map_err(|e| Self::internal("Failed to get name", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| Self::internal("Failed to get password_hash", e))?,
            role,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| Self::internal("Failed to get is_verified", e))?,
            verification_token: row
                .try_get("verification_token")
                .map_err(|e| Self::internal("Failed to get verification_token", e))?,
            failed_attempts: row
                .try_get::<u32, _>("failed_attempts")
                .map_err(|e| Self::internal("Failed to get failed_attempts", e))?,
            locked_until: row
                .try_get::<Option<DateTime<Utc>>, _>("locked_until")
                .map_err(|e| Self::internal("Failed to get locked_until", e))?,
            reset_token: row
                .try_get("reset_token")
                .map_err(|e| Self::internal("Failed to get reset_token", e))?,
            reset_token_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("reset_token_expires_at")
                .map_err(|e| Self::internal("Failed to get reset_token_expires_at", e))?,
            registration_complete: row
                .try_get("registration_complete")
                .map_err(|e| Self::internal("Failed to get registration_complete", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::internal("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| Self::internal("Failed to get updated_at", e))?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| Self::internal("Failed to get last_login_at", e))?,
        })
    }

    async fn find_by_column(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {column} = ? LIMIT 1"
        );

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::internal("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.find_by_column("email", email).await
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, DomainError> {
        self.find_by_column("phone", phone).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.find_by_column("id", &id.to_string()).await
    }

    async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, DomainError> {
        self.find_by_column("verification_token", token).await
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, DomainError> {
        self.find_by_column("reset_token", token).await
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, email, phone, name, password_hash, role,
                is_verified, verification_token,
                failed_attempts, locked_until,
                reset_token, reset_token_expires_at,
                registration_complete, created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let role = match account.role {
            AccountRole::Admin => "admin",
            AccountRole::Staff => "staff",
        };

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.phone)
            .bind(&account.name)
            .bind(&account.password_hash)
            .bind(role)
            .bind(account.is_verified)
            .bind(&account.verification_token)
            .bind(account.failed_attempts)
            .bind(account.locked_until)
            .bind(&account.reset_token)
            .bind(account.reset_token_expires_at)
            .bind(account.registration_complete)
            .bind(account.created_at)
            .bind(account.updated_at)
            .bind(account.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::internal("Failed to create account", e))?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        // cleared Option fields are written through as NULL, which is what
        // makes verification/reset tokens single-use
        let query = r#"
            UPDATE accounts SET
                email = ?, phone = ?, name = ?, password_hash = ?,
                is_verified = ?, verification_token = ?,
                failed_attempts = ?, locked_until = ?,
                reset_token = ?, reset_token_expires_at = ?,
                registration_complete = ?, updated_at = ?, last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.email)
            .bind(&account.phone)
            .bind(&account.name)
            .bind(&account.password_hash)
            .bind(account.is_verified)
            .bind(&account.verification_token)
            .bind(account.failed_attempts)
            .bind(account.locked_until)
            .bind(&account.reset_token)
            .bind(account.reset_token_expires_at)
            .bind(account.registration_complete)
            .bind(account.updated_at)
            .bind(account.last_login_at)
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::internal("Failed to update account", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        }

        Ok(account)
    }

    async fn record_failed_attempt(
        &self,
        id: Uuid,
        lock_threshold: u32,
        lock_until: DateTime<Utc>,
    ) -> Result<u32, DomainError> {
        // the lock condition reads the pre-increment value, so it is
        // phrased as `failed_attempts + 1 >= threshold`; the whole
        // transition is one statement. A lock already expired does not
        // count as a lock, otherwise the account would never re-lock
        // once the first lock ran out.
        let query = r#"
            UPDATE accounts SET
                locked_until = IF(
                    failed_attempts + 1 >= ?
                        AND (locked_until IS NULL OR locked_until <= UTC_TIMESTAMP()),
                    ?,
                    locked_until
                ),
                failed_attempts = failed_attempts + 1,
                updated_at = UTC_TIMESTAMP()
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(lock_threshold)
            .bind(lock_until)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::internal("Failed to record attempt", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        }

        let row = sqlx::query("SELECT failed_attempts FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::internal("Failed to read attempt count", e))?;

        row.try_get::<u32, _>("failed_attempts")
            .map_err(|e| Self::internal("Failed to get failed_attempts", e))
    }

    async fn reset_lockout(&self, id: Uuid) -> Result<(), DomainError> {
        let query = r#"
            UPDATE accounts SET
                failed_attempts = 0,
                locked_until = NULL,
                updated_at = UTC_TIMESTAMP()
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::internal("Failed to reset lockout", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        }

        Ok(())
    }
}
