pub mod jwt;
pub mod middleware;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use crate::Result;
use jwt::JwtService;

/// Session claims; `sub` is the user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub exp: usize, // Expiration time
}

pub struct AuthService {
    jwt: JwtService,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            jwt: JwtService::new(jwt_secret),
            token_ttl: Duration::days(7),
        }
    }

    pub fn generate_token(&self, user_id: i64, username: &str) -> Result<String> {
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            exp: (Utc::now() + self.token_ttl).timestamp().max(0) as usize,
        };
        self.jwt.encode_token(&claims)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        self.jwt.decode_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;

    #[test]
    fn test_token_round_trip() {
        let auth = AuthService::new("test-secret");

        let token = auth.generate_token(42, "ada").unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "ada");
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = AuthService::new("one-secret").generate_token(1, "ada").unwrap();

        let result = AuthService::new("another-secret").verify_token(&token);

        assert!(matches!(result, Err(AppError::AuthError(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt = JwtService::new("test-secret");
        let token = jwt.encode_token(&Claims {
            sub: 1,
            username: "ada".to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp() as usize,
        }).unwrap();

        assert!(jwt.decode_token(&token).is_err());
    }
}
