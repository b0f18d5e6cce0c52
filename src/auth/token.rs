//! Token building
//!
//! Cube APIs authenticate with a JWT signed over the security context
//! using the deployment's API secret. The algorithm is pinned to HS256;
//! there is no negotiation and the unsigned "none" algorithm is never
//! accepted by construction.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

/// Relative expiry injected when the security context carries neither an
/// `exp` nor an `expiresIn` claim
pub const DEFAULT_EXPIRES_IN: &str = "7d";

/// Build the API token for a request context.
///
/// With no security context the token is signed over an empty claim set.
/// With a context, a copy of the claims is signed; if the copy contains
/// neither `exp` nor `expiresIn`, `expiresIn` is set to [`DEFAULT_EXPIRES_IN`]
/// first. The caller's mapping is never mutated.
pub fn api_token(secret: &str, security_context: Option<&JsonObject>) -> Result<String> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    let claims = match security_context {
        None => JsonObject::new(),
        Some(context) => {
            let mut claims = context.clone();
            if !claims.contains_key("exp") && !claims.contains_key("expiresIn") {
                claims.insert(
                    "expiresIn".to_string(),
                    JsonValue::String(DEFAULT_EXPIRES_IN.to_string()),
                );
            }
            claims
        }
    };

    encode(&header, &claims, &key).map_err(|e| Error::token_sign(e.to_string()))
}
