use actix_web::http::header::HeaderValue;
use argon2::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::{JWT_SECRET, SECRET_KEY};
use crate::models::user_model::SlimUser;

use super::errors::{AuthError, TodoApiError};
use super::middlewares::auth::Claims;

const SALT: &'static [u8] = b"supersecuresalt";

// Hashing

/// Hash a password, to secure
pub fn hash_password(password: &str) -> Result<String, TodoApiError> {
    let config = Config {
        secret: SECRET_KEY.as_bytes(),
        ..Default::default()
    };

    argon2::hash_encoded(password.as_bytes(), SALT, &config).map_err(|err| {
        log::error!("Error while hashing password: {}", err);
        TodoApiError::InternalServerError
    })
}

/// Verify password and hash are equal
pub fn verify_hash(hash: &str, password: &str) -> Result<bool, TodoApiError> {
    argon2::verify_encoded_ext(hash, password.as_bytes(), SECRET_KEY.as_bytes(), &[]).map_err(
        |err| {
            log::error!("Error while verifying password: {}", err);
            TodoApiError::InternalServerError
        },
    )
}

// JWT

/// Create a jwt token for user
pub fn encode_token(user: &SlimUser) -> Result<String, AuthError> {
    Ok(encode::<Claims>(
        &Header::new(Algorithm::HS256),
        &user.into(),
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )?)
}

/// Verifies the `Authorization: Bearer <token>` header and
/// returns the claims carried by the token
pub fn decode_token(auth_header: &HeaderValue) -> Result<Claims, AuthError> {
    let auth_header_string = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationHeader)?;

    let token = auth_header_string
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthorizationHeader)?;

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(decoded.claims)
}

#[cfg(test)]
mod test {
    use super::*;

    fn some_user() -> SlimUser {
        SlimUser {
            id: uuid::Uuid::new_v4(),
            email: "ch@gmail.com".to_string(),
            name: "Chuba".to_string(),
        }
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("123").unwrap();

        assert!(verify_hash(&hash, "123").unwrap());
        assert!(!verify_hash(&hash, "1234").unwrap());
    }

    #[test]
    fn token_roundtrip_recovers_identity() {
        let user = some_user();

        let token = encode_token(&user).unwrap();
        let header = HeaderValue::from_str(&format!("Bearer {}", token)).unwrap();

        let claims = decode_token(&header).unwrap();

        assert_eq!(claims.id, user.id.to_string());
        assert_eq!(claims.email, user.email);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let header = HeaderValue::from_static("Bearer not.a.token");

        assert!(matches!(
            decode_token(&header),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn header_without_bearer_prefix_is_rejected() {
        let header = HeaderValue::from_static("Basic abcdef");

        assert!(matches!(
            decode_token(&header),
            Err(AuthError::InvalidAuthorizationHeader)
        ));
    }
}
