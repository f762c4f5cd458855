// ============================================================================
// TOKEN CODEC - Decode the payload of a compact identity token
// ============================================================================
// The client never verifies the signature; the decoded identity is used for
// UI routing/display only. Every protected REST call is authorized again by
// the backend, so this decode is never a security boundary.
// ============================================================================

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Identity, Role};

/// Reasons a persisted or freshly issued token cannot be trusted.
/// Any of these means the token must be discarded entirely.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("token does not have three dot-separated segments")]
    MalformedToken,
    #[error("token payload is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("token payload is not a JSON object: {0}")]
    InvalidPayload(String),
}

/// Claims the identity service puts into the token payload. All optional:
/// a missing claim is filled from the separately stored user data or left
/// empty, never invented.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "userId")]
    user_id: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "contactNumber")]
    contact_number: Option<String>,
}

/// Decode the middle segment of a compact token into an [`Identity`].
///
/// Pure function of its input: no storage access, no network, no panics on
/// malformed data. The role claim is lower-cased, the `sub` claim becomes
/// the email.
pub fn decode_identity(token: &str) -> Result<Identity, DecodeError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(DecodeError::MalformedToken),
    };

    // Some issuers pad the base64url segment, some don't; accept both.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;

    let claims: TokenClaims =
        serde_json::from_slice(&bytes).map_err(|e| DecodeError::InvalidPayload(e.to_string()))?;

    Ok(Identity {
        id: claims.id.or(claims.user_id).unwrap_or_default(),
        username: claims.username.or(claims.name).unwrap_or_default(),
        email: claims.sub.unwrap_or_default(),
        role: Role::parse(claims.role.as_deref().unwrap_or_default()),
        contact_number: claims.contact_number,
    })
}

/// Build an unsigned three-segment token around a JSON payload. Test helper.
#[cfg(test)]
pub fn encode_unsigned_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{header}.{body}.unsigned")
}
