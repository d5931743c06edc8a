use std::env;
use std::sync::Arc;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use course_core::model::{NewUser, User, UserError, UserId, normalize_email};
use storage::repository::{StorageError, UserRepository};

use crate::Clock;
use crate::error::AuthServiceError;

/// Lifetime of an issued token.
pub const TOKEN_TTL_DAYS: i64 = 30;

const DEV_SECRET: &str = "course-study-dev-secret";

/// Signing material for session tokens.
#[derive(Clone)]
pub struct JwtConfig {
    secret: Vec<u8>,
    ttl: Duration,
}

impl JwtConfig {
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::days(TOKEN_TTL_DAYS),
        }
    }

    /// Secret from `JWT_SECRET`; falls back to a fixed development secret.
    #[must_use]
    pub fn from_env() -> Self {
        match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => Self::new(secret),
            _ => {
                log::warn!("JWT_SECRET is not set; using an insecure development secret");
                Self::new(DEV_SECRET)
            }
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// A user together with a freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Registration, login and token verification.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
}

impl AuthService {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>, jwt: JwtConfig) -> Self {
        Self { clock, users, jwt }
    }

    /// # Errors
    ///
    /// Returns `AuthServiceError::User` for a blank name, invalid email or
    /// blank password, and `AuthServiceError::DuplicateEmail` when the email
    /// is taken.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthServiceError> {
        if password.is_empty() {
            return Err(UserError::EmptyPassword.into());
        }
        let email = normalize_email(email)?;
        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(AuthServiceError::DuplicateEmail);
        }

        let new_user = NewUser::new(name, &email, hash_password(password)?, self.clock.now())?;
        let user = match self.users.insert_user(new_user).await {
            Ok(user) => user,
            Err(StorageError::Conflict) => return Err(AuthServiceError::DuplicateEmail),
            Err(other) => return Err(other.into()),
        };
        log::info!("registered user {}", user.id);

        let token = self.issue_token(user.id)?;
        Ok(AuthSession { user, token })
    }

    /// # Errors
    ///
    /// Returns `AuthServiceError::InvalidCredentials` for an unknown email or a
    /// wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthServiceError> {
        let email = normalize_email(email).map_err(|_| AuthServiceError::InvalidCredentials)?;
        let user = self
            .users
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash) {
            log::debug!("failed login for user {}", user.id);
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self.issue_token(user.id)?;
        Ok(AuthSession { user, token })
    }

    /// # Errors
    ///
    /// Returns `AuthServiceError::Signing` if encoding fails.
    pub fn issue_token(&self, user_id: UserId) -> Result<String, AuthServiceError> {
        let now = self.clock.now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.jwt.ttl).timestamp(),
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt.secret),
        )?)
    }

    /// Resolve a token to the user id it was issued for.
    ///
    /// Expiry is checked against the service clock.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError::InvalidToken` for a bad signature or shape and
    /// `AuthServiceError::ExpiredToken` once the token has lapsed.
    pub fn verify_token(&self, token: &str) -> Result<UserId, AuthServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.jwt.secret),
            &validation,
        )
        .map_err(|_| AuthServiceError::InvalidToken)?;

        if data.claims.exp <= self.clock.now().timestamp() {
            return Err(AuthServiceError::ExpiredToken);
        }
        data.claims
            .sub
            .parse()
            .map_err(|_| AuthServiceError::InvalidToken)
    }
}

fn hash_password(password: &str) -> Result<String, AuthServiceError> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| AuthServiceError::Hash(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthServiceError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
