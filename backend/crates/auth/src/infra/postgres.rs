//! PostgreSQL Repository Implementation
//!
//! The pool comes from `platform::database::shared_pool`, so the first query
//! after startup (or after a failed connect) establishes the connection.

use chrono::{DateTime, Utc};
use platform::database::{DatabaseConfig, shared_pool};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, VerificationFields};
use crate::domain::value_object::{
    account_id::AccountId,
    account_role::AccountRole,
    display_name::DisplayName,
    email::Email,
    user_password::UserPassword,
    verification_state::VerificationState,
    verification_token::{IssuedToken, TokenDigest, VerificationToken},
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed account repository
#[derive(Clone, Debug)]
pub struct PgAccountRepository {
    db: DatabaseConfig,
}

impl PgAccountRepository {
    pub fn new(db: DatabaseConfig) -> Self {
        Self { db }
    }

    async fn pool(&self) -> AuthResult<PgPool> {
        Ok(shared_pool(&self.db).await?)
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        let pool = self.pool().await?;
        let pending = account.pending_token();

        let result = sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                display_name,
                role,
                password_hash,
                is_verified,
                verification_token,
                verification_token_expires,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.display_name.as_str())
        .bind(account.role.code())
        .bind(account.password_hash.as_phc_string())
        .bind(account.is_verified())
        .bind(pending.map(|issued| issued.token.as_str()))
        .bind(pending.map(|issued| issued.expires_at))
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(AuthError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        let pool = self.pool().await?;
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                display_name,
                role,
                password_hash,
                is_verified,
                verification_token,
                verification_token_expires,
                consumed_token_digest,
                created_at,
                updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let pool = self.pool().await?;
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                display_name,
                role,
                password_hash,
                is_verified,
                verification_token,
                verification_token_expires,
                consumed_token_digest,
                created_at,
                updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let pool = self.pool().await?;
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&pool)
                .await?;
        Ok(exists)
    }

    async fn find_pending_verifications(&self) -> AuthResult<Vec<Account>> {
        let pool = self.pool().await?;
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                display_name,
                role,
                password_hash,
                is_verified,
                verification_token,
                verification_token_expires,
                consumed_token_digest,
                created_at,
                updated_at
            FROM accounts
            WHERE is_verified = FALSE AND verification_token IS NOT NULL
            "#,
        )
        .fetch_all(&pool)
        .await?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }

    async fn find_by_consumed_digest(&self, digest: &TokenDigest) -> AuthResult<Option<Account>> {
        let pool = self.pool().await?;
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                display_name,
                role,
                password_hash,
                is_verified,
                verification_token,
                verification_token_expires,
                consumed_token_digest,
                created_at,
                updated_at
            FROM accounts
            WHERE is_verified = TRUE AND consumed_token_digest = $1
            "#,
        )
        .bind(&digest.as_bytes()[..])
        .fetch_optional(&pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn set_verification_fields(
        &self,
        account_id: &AccountId,
        fields: &VerificationFields,
    ) -> AuthResult<bool> {
        let pool = self.pool().await?;

        let result = match fields {
            VerificationFields::Pending(issued) => {
                sqlx::query(
                    r#"
                    UPDATE accounts
                    SET verification_token = $2,
                        verification_token_expires = $3,
                        updated_at = NOW()
                    WHERE account_id = $1 AND is_verified = FALSE
                    "#,
                )
                .bind(account_id.as_uuid())
                .bind(issued.token.as_str())
                .bind(issued.expires_at)
                .execute(&pool)
                .await?
            }
            VerificationFields::Verified {
                expected_token,
                consumed_digest,
            } => {
                // Flag, token and expiry change together in one statement
                sqlx::query(
                    r#"
                    UPDATE accounts
                    SET is_verified = TRUE,
                        verification_token = NULL,
                        verification_token_expires = NULL,
                        consumed_token_digest = $3,
                        updated_at = NOW()
                    WHERE account_id = $1
                      AND is_verified = FALSE
                      AND ($2::text IS NULL OR verification_token = $2)
                    "#,
                )
                .bind(account_id.as_uuid())
                .bind(expected_token.as_ref().map(VerificationToken::as_str))
                .bind(consumed_digest.as_ref().map(|d| d.as_bytes().to_vec()))
                .execute(&pool)
                .await?
            }
        };

        Ok(result.rows_affected() == 1)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    display_name: String,
    role: String,
    password_hash: String,
    is_verified: bool,
    verification_token: Option<String>,
    verification_token_expires: Option<DateTime<Utc>>,
    consumed_token_digest: Option<Vec<u8>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let role = AccountRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role: {}", self.role)))?;
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        let verification = if self.is_verified {
            VerificationState::Verified {
                consumed_digest: self
                    .consumed_token_digest
                    .as_deref()
                    .and_then(TokenDigest::from_slice),
            }
        } else {
            VerificationState::Unverified {
                pending: match (self.verification_token, self.verification_token_expires) {
                    (Some(token), Some(expires_at)) => Some(IssuedToken {
                        token: VerificationToken::from_db(token),
                        expires_at,
                    }),
                    _ => None,
                },
            }
        };

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            display_name: DisplayName::from_db(self.display_name),
            role,
            password_hash,
            verification,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
