//! Authentication extractors.
//!
//! The identity provider fronts all login flows and hands the browser a JWT;
//! the gateway reads the subject claim out of the payload and trusts it as
//! given (token verification is the provider's concern, enforced at its edge).
//! Handlers receive the identity as an explicit parameter - core logic never
//! reaches into ambient auth state.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use forkful_core::UserId;

use crate::models::CurrentUser;

/// Extractor that requires an authenticated caller.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.id)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

/// Error returned when a bearer token is missing or unreadable.
#[derive(Debug)]
pub enum AuthRejection {
    /// No `Authorization: Bearer` header on the request.
    MissingToken,
    /// The token is not a decodable JWT with a uuid subject.
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken => "Missing authorization token",
            Self::InvalidToken => "Invalid authorization token",
        };
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthRejection::MissingToken)?;
        let user_id = decode_subject(token).ok_or(AuthRejection::InvalidToken)?;
        Ok(Self(CurrentUser { id: user_id }))
    }
}

/// Extractor that optionally resolves the caller.
///
/// Unlike `RequireUser`, this does not reject the request when no valid token
/// is present.
pub struct OptionalUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = bearer_token(parts)
            .and_then(decode_subject)
            .map(|id| CurrentUser { id });
        Ok(Self(user))
    }
}

/// Pull the bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[derive(Deserialize)]
struct Claims {
    sub: String,
}

/// Decode the JWT payload and extract the subject as a `UserId`.
fn decode_subject(token: &str) -> Option<UserId> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let _signature = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    let decoded = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Claims = serde_json::from_slice(&decoded).ok()?;
    let subject = Uuid::parse_str(&claims.sub).ok()?;
    Some(UserId::new(subject))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forge_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn test_decode_subject_valid_token() {
        let id = Uuid::new_v4();
        let token = forge_token(&json!({ "sub": id.to_string(), "role": "authenticated" }));

        let decoded = decode_subject(&token).expect("subject");
        assert_eq!(decoded, UserId::new(id));
    }

    #[test]
    fn test_decode_subject_rejects_garbage() {
        assert!(decode_subject("not-a-jwt").is_none());
        assert!(decode_subject("a.b").is_none());
        assert!(decode_subject("a.b.c.d").is_none());
        assert!(decode_subject("a.!!!.c").is_none());

        // Valid structure, non-uuid subject
        let token = forge_token(&json!({ "sub": "service-role" }));
        assert!(decode_subject(&token).is_none());

        // Valid structure, no subject
        let token = forge_token(&json!({ "role": "anon" }));
        assert!(decode_subject(&token).is_none());
    }
}
