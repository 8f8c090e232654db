use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Identity;
use crate::gateway::{GatewayError, GatewayResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,       // user id
    pub email: String,
    pub exp: i64,        // expiration timestamp
    pub iat: i64,        // issued at timestamp
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

pub fn create_token(
    user_id: Uuid,
    email: &str,
    secret: &str,
    expiration_hours: i64,
) -> GatewayResult<String> {
    let now = Utc::now();
    let exp = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| GatewayError::Internal(format!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, secret: &str) -> GatewayResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| GatewayError::Auth(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_resolves_to_identity() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, "renter@example.com", "secret", 1).unwrap();

        let identity: Identity = verify_token(&token, "secret").unwrap().into();

        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.email, "renter@example.com");
    }

    #[test]
    fn test_token_rejected_with_other_secret() {
        let token = create_token(Uuid::new_v4(), "renter@example.com", "secret", 1).unwrap();

        assert!(matches!(
            verify_token(&token, "another-secret"),
            Err(GatewayError::Auth(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = create_token(Uuid::new_v4(), "renter@example.com", "secret", -2).unwrap();

        assert!(matches!(
            verify_token(&token, "secret"),
            Err(GatewayError::Auth(_))
        ));
    }
}
