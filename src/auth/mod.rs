use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Identity extracted from a verified bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId", alias = "sub")]
    pub user_id: String,
    pub exp: usize,
}

pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<AuthUser>;
}

/// HS256 verification against the shared secret. Tokens are issued elsewhere.
pub struct JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }
}

impl TokenValidator for JwtValidator {
    fn validate(&self, token: &str) -> Result<AuthUser> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::InvalidToken(e.to_string())
        })?;

        Ok(AuthUser {
            user_id: data.claims.user_id,
        })
    }
}

/// Token part of an `Authorization: Bearer <token>` header
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(secret: &str, user_id: &str, exp: usize) -> String {
        let claims = Claims {
            user_id: user_id.to_string(),
            exp,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    fn in_one_hour() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_valid_token() {
        let validator = JwtValidator::new("secret");
        let user = validator.validate(&token("secret", "user-1", in_one_hour())).unwrap();
        assert_eq!(user.user_id, "user-1");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let validator = JwtValidator::new("secret");
        let err = validator
            .validate(&token("other", "user-1", in_one_hour()))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidToken(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let validator = JwtValidator::new("secret");
        let expired = (chrono::Utc::now().timestamp() - 3600) as usize;
        assert!(validator.validate(&token("secret", "user-1", expired)).is_err());
    }

    #[test]
    fn test_sub_claim_is_accepted() {
        let claims: Claims = serde_json::from_str(r#"{"sub":"abc","exp":1}"#).unwrap();
        assert_eq!(claims.user_id, "abc");
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic xyz"), None);
    }
}
