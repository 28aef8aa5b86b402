use jsonwebtoken::{
    decode, encode, errors::Error as JwtError, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::config::AuthConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub jti: String, // Token ID, used for revocation
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at
}

impl Claims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }

    /// `None` when `exp` is outside the representable timestamp range.
    pub fn expires_at(&self) -> Option<chrono::NaiveDateTime> {
        let secs = i64::try_from(self.exp).ok()?;
        chrono::DateTime::<chrono::Utc>::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
    }
}

pub fn create_jwt_token(user_id: &str, config: &AuthConfig) -> Result<String, JwtError> {
    let now = chrono::Utc::now();
    let exp = (now + chrono::Duration::hours(config.jwt_expire_hours)).timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        jti: Uuid::new_v4().to_string(),
        exp,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
}

pub fn validate_jwt_token(token: &str, config: &AuthConfig) -> Result<Claims, JwtError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            jwt_expire_hours: 1,
            cookie_expire_days: 1,
            cookie_secure: false,
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn issued_token_carries_subject_and_unique_id() {
        let config = config("secret");
        let first = create_jwt_token("42", &config).unwrap();
        let second = create_jwt_token("42", &config).unwrap();

        let a = validate_jwt_token(&first, &config).unwrap();
        let b = validate_jwt_token(&second, &config).unwrap();
        assert_eq!(a.user_id(), Some(42));
        assert_ne!(a.jti, b.jti);
        assert_eq!(a.exp - a.iat, 3600);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = create_jwt_token("42", &config("secret")).unwrap();
        assert!(validate_jwt_token(&token, &config("other")).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config("secret");
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "42".to_string(),
            jti: "expired".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_ref()),
        )
        .unwrap();

        assert!(validate_jwt_token(&token, &config).is_err());
    }

    #[test]
    fn out_of_range_expiry_has_no_timestamp() {
        let mut claims = Claims {
            sub: "42".to_string(),
            jti: "x".to_string(),
            exp: 1_700_000_000,
            iat: 0,
        };
        assert_eq!(
            claims.expires_at().map(|dt| dt.and_utc().timestamp()),
            Some(1_700_000_000)
        );

        claims.exp = usize::MAX;
        assert_eq!(claims.expires_at(), None);
    }

    #[test]
    fn non_numeric_subject_has_no_user_id() {
        let claims = Claims {
            sub: "abc".to_string(),
            jti: "x".to_string(),
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id(), None);
    }
}
