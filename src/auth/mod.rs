//! Bearer-token authentication module.
//!
//! Issues and verifies HS256-signed tokens and owns password hashing for
//! users and agents. A missing token is 401; a present but invalid or
//! expired token is 403.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::User;

/// Token lifetime in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Claims carried by the signed bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub email: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub exp: i64,
}

/// Sign a one-hour bearer token for a user.
pub fn issue_token(user: &User, secret: &str) -> Result<String, AppError> {
    let claims = Claims {
        id: user.id.clone(),
        email: user.email.clone(),
        is_admin: user.is_admin,
        exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Decode and validate a bearer token, including its expiry.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Bearer auth layer function that takes the signing secret as a parameter.
pub async fn jwt_auth_layer(secret: String, request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    let Some(token) = token else {
        return AppError::Unauthorized("Access denied. No token provided".to_string())
            .into_response();
    };

    match decode_token(&token, &secret) {
        Ok(_claims) => next.run(request).await,
        Err(e) => {
            tracing::debug!("Rejected bearer token: {}", e);
            AppError::Forbidden("Invalid or expired token".to_string()).into_response()
        }
    }
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against its stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Create the bootstrap admin login if the user table has no admin yet.
///
/// Invoked from the process entry point; safe to call on every startup.
pub async fn ensure_admin_user(repo: &Repository, config: &Config) -> Result<(), AppError> {
    if repo.admin_exists().await? {
        return Ok(());
    }

    let password_hash = hash_password(&config.admin_password)?;
    repo.create_user(&config.admin_email, &password_hash, true)
        .await?;

    tracing::info!("Admin user created: {}", config.admin_email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "user-1".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: String::new(),
            is_admin: true,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let token = issue_token(&test_user(), "secret").unwrap();
        let claims = decode_token(&token, "secret").unwrap();

        assert_eq!(claims.id, "user-1");
        assert_eq!(claims.email, "admin@example.com");
        assert!(claims.is_admin);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = issue_token(&test_user(), "secret").unwrap();
        assert!(decode_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims {
            id: "user-1".to_string(),
            email: "admin@example.com".to_string(),
            is_admin: true,
            exp: Utc::now().timestamp() - 7200,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(decode_token(&token, "secret").is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(decode_token("not-a-token", "secret").is_err());
    }

    #[test]
    fn test_password_round_trip() {
        let hash = hash_password("admin123").unwrap();
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("admin124", &hash));
    }

    #[test]
    fn test_verify_against_malformed_hash() {
        assert!(!verify_password("admin123", "not-a-bcrypt-hash"));
    }
}
