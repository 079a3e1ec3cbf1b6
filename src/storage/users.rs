//! User accounts

use super::password::{hash_password, verify_password};
use crate::models::User;
use crate::utils::error::{AppError, AppResult};
use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register an account. Emails are stored lowercased; a taken email is a conflict.
    pub async fn create_user(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email);
        let password_hash = hash_password(password)?;

        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, created_at)
             VALUES (?, ?, ?)
             RETURNING id, email, password_hash, created_at",
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => {
                info!("Created user {} ({})", user.id, user.email);
                Ok(user)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Conflict(format!("An account for {} already exists", email)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// The user when the password matches; `None` for unknown email or wrong password
    pub async fn verify(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let user = match self.find_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!("Login attempt for unknown account");
                return Ok(None);
            }
        };

        if verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            debug!("Password mismatch for user {}", user.id);
            Ok(None)
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
