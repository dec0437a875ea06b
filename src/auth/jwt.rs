use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::{Claims, Identity},
    errors::{AppError, AppResult},
    models::domain::Role,
};

/// Issues and verifies bearer tokens. Built once at startup from the signing
/// secret and shared read-only between workers.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration: Duration,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration: Duration) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        // Expiry is checked against an explicit clock in `verify_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation,
            expiration,
        }
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    pub fn issue(&self, user_id: i32, role: Role) -> AppResult<String> {
        self.issue_at(user_id, role, Utc::now())
    }

    pub fn issue_at(&self, user_id: i32, role: Role, now: DateTime<Utc>) -> AppResult<String> {
        let claims = Claims::new(user_id, role, now, self.expiration);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }

    pub fn verify(&self, token: &str) -> AppResult<Identity> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AppResult<Identity> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Token signature is invalid".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => {
                    AppError::Unauthorized("Token algorithm is not accepted".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
            },
        )?;

        let claims = token_data.claims;
        if claims.is_expired_at(now) {
            return Err(AppError::Unauthorized("Token has expired".to_string()));
        }

        claims.identity()
    }
}
