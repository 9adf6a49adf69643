//! Session [`Token`] and its [`Claims`].

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use common::{unit, DateTime, DateTimeOf};
use derive_more::{AsRef, Display, Error, From};
use serde::{Deserialize, Serialize};
use tracerr::Traced;

/// Claims of a session [`Token`] the client relies on.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Claims {
    /// [`DateTime`] when the [`Token`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

impl Claims {
    /// Decodes [`Claims`] from the payload of the provided [`Token`].
    ///
    /// Only the payload segment is read: neither the header nor the
    /// signature is inspected, so the decoded [`Claims`] must never be used
    /// for authorization decisions, only to avoid presenting an expired
    /// session.
    ///
    /// # Errors
    ///
    /// Errors if the [`Token`] has no payload segment, the payload is not
    /// valid base64url-encoded JSON, or it has no numeric `exp` claim.
    pub fn decode(token: &Token) -> Result<Self, Traced<DecodeError>> {
        let payload = token
            .as_ref()
            .split('.')
            .nth(1)
            .ok_or_else(|| tracerr::new!(DecodeError::NoPayload))?;
        let json = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(tracerr::from_and_wrap!(=> DecodeError))?;
        serde_json::from_slice(&json)
            .map_err(tracerr::from_and_wrap!(=> DecodeError))
    }

    /// Indicates whether these [`Claims`] are expired at the provided moment.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime) -> bool {
        self.expires_at.coerce::<()>() <= now
    }
}

/// Bearer token of a session, issued by the backend.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
#[serde(transparent)]
pub struct Token(String);

/// [`DateTime`] of a session [`Token`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Claims, unit::Expiration)>;

/// Error of decoding [`Claims`].
#[derive(Debug, Display, Error, From)]
pub enum DecodeError {
    /// [`Token`] has no payload segment.
    #[display("Session token has no payload")]
    NoPayload,

    /// Payload is not valid base64url.
    #[display("Failed to decode session token payload: {_0}")]
    Base64(base64::DecodeError),

    /// Payload is not a JSON object with the expected [`Claims`].
    #[display("Failed to parse session token claims: {_0}")]
    Json(serde_json::Error),
}
