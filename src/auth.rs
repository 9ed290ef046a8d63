//! Bearer-token verification.
//!
//! [`AuthenticatedUser`] is an actix extractor: a handler that takes one as an
//! argument only runs once the `Authorization: Bearer <token>` header has been
//! verified. Every failure short-circuits with a 401 before the handler body.

use std::collections::HashSet;
use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::types::{UserId, deserialize_user_id};
use crate::dto::errors::{ErrorEnvelope, ErrorKind};
use crate::models::config::JwtConfig;

/// Message returned for every authentication failure.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token.";

/// Identity carried in the token's `payload` claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    #[serde(rename = "_id", alias = "id", deserialize_with = "deserialize_user_id")]
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Any other profile fields the identity service put in the token.
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// Registered claims plus the user payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub payload: AuthenticatedUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Reasons a request could not be authenticated.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header is missing")]
    MissingHeader,
    #[error("authorization header is malformed")]
    MalformedHeader,
    #[error("authorization scheme is not Bearer")]
    UnsupportedScheme,
    #[error("token rejected: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("token verification is not configured")]
    MissingConfig,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingConfig => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AuthError::MissingConfig => {
                ErrorEnvelope::new(ErrorKind::Internal, "Internal server error")
            }
            _ => ErrorEnvelope::new(ErrorKind::Authentication, INVALID_TOKEN_MESSAGE),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Pull the token out of an `Authorization` header value.
///
/// The value must be exactly two whitespace-separated segments, the first being
/// the `Bearer` scheme (any case).
pub fn bearer_token(header_value: &str) -> Result<&str, AuthError> {
    let mut parts = header_value.split_whitespace();
    let scheme = parts.next().ok_or(AuthError::MalformedHeader)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::UnsupportedScheme);
    }
    let token = parts.next().ok_or(AuthError::MalformedHeader)?;
    if parts.next().is_some() {
        return Err(AuthError::MalformedHeader);
    }
    Ok(token)
}

/// Verify an HS256 token and return the user it was issued for.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<AuthenticatedUser, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims = if config.require_expiry {
        HashSet::from(["exp".to_string()])
    } else {
        HashSet::new()
    };

    let key = DecodingKey::from_secret(config.secret.as_bytes());
    let data = decode::<Claims>(token, &key, &validation)?;
    Ok(data.claims.payload)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
    let config = req
        .app_data::<web::Data<JwtConfig>>()
        .ok_or(AuthError::MissingConfig)?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    verify_token(bearer_token(header_value)?, config)
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = authenticate(req);
        match &result {
            Err(AuthError::MissingConfig) => {
                log::error!("JwtConfig is not registered as app data");
            }
            Err(e) => log::debug!("Rejected request to {}: {e}", req.path()),
            Ok(_) => {}
        }
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    const SECRET: &str = "test-secret";

    fn config() -> JwtConfig {
        JwtConfig {
            secret: SECRET.to_string(),
            require_expiry: false,
        }
    }

    fn sign(claims: &Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn now() -> u64 {
        jsonwebtoken::get_current_timestamp()
    }

    #[test]
    fn extracts_second_segment() {
        assert_eq!(bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token("bearer   abc").unwrap(), "abc");
    }

    #[test]
    fn rejects_other_schemes_and_shapes() {
        assert!(matches!(
            bearer_token("Basic abc"),
            Err(AuthError::UnsupportedScheme)
        ));
        assert!(matches!(bearer_token("Bearer"), Err(AuthError::MalformedHeader)));
        assert!(matches!(bearer_token(""), Err(AuthError::MalformedHeader)));
        assert!(matches!(
            bearer_token("Bearer a b"),
            Err(AuthError::MalformedHeader)
        ));
    }

    #[test]
    fn verifies_payload_and_keeps_profile_fields() {
        let token = sign(
            &json!({ "payload": { "_id": "7", "username": "alice", "avatar": "a.png" } }),
            SECRET,
        );
        let user = verify_token(&token, &config()).unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.username.as_deref(), Some("alice"));
        assert_eq!(user.profile.get("avatar"), Some(&json!("a.png")));
    }

    #[test]
    fn accepts_numeric_id_alias() {
        let token = sign(&json!({ "payload": { "id": 7 } }), SECRET);
        let user = verify_token(&token, &config()).unwrap();
        assert_eq!(user.id, 7);
        assert!(user.username.is_none());
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = sign(&json!({ "payload": { "_id": 1 } }), "other-secret");
        assert!(matches!(
            verify_token(&token, &config()),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let token = sign(
            &json!({ "payload": { "_id": 1 }, "exp": now() - 3600 }),
            SECRET,
        );
        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn expiry_can_be_required() {
        let token = sign(&json!({ "payload": { "_id": 1 } }), SECRET);
        let strict = JwtConfig {
            require_expiry: true,
            ..config()
        };
        assert!(verify_token(&token, &config()).is_ok());
        assert!(verify_token(&token, &strict).is_err());
    }

    #[test]
    fn rejects_token_without_payload() {
        let token = sign(&json!({ "sub": "1", "exp": now() + 3600 }), SECRET);
        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(verify_token("not-a-token", &config()).is_err());
    }
}
