//! [`Backend`]-related implementations.

pub mod endpoint;
#[cfg(test)]
pub(crate) mod mock;
#[cfg(feature = "http")]
pub mod rest;

use derive_more::{Display, Error as StdError, From};
use http::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::user::Token;

#[cfg(feature = "http")]
pub use self::rest::Rest;

/// Remote backend operation.
pub use common::Handler as Backend;

/// Endpoint of a [`Backend`] REST API.
///
/// An [`Endpoint`] value carries the parameters of a single call: `GET`
/// [`Endpoint`]s are sent as a query string, all others as a JSON body.
pub trait Endpoint: Serialize {
    /// [`Method`] of this [`Endpoint`].
    const METHOD: Method;

    /// Path of this [`Endpoint`], relative to the API base URL.
    const PATH: &'static str;

    /// Indicates whether this [`Endpoint`] requires a session [`Token`].
    const AUTHORIZED: bool = true;

    /// Type of a successful response of this [`Endpoint`].
    type Response: DeserializeOwned;
}

/// Request to an [`Endpoint`] of a [`Backend`].
#[derive(Clone, Debug)]
pub struct Request<E> {
    /// [`Endpoint`] to call.
    pub endpoint: E,

    /// Session [`Token`] to authorize the call with.
    pub token: Option<Token>,
}

impl<E> Request<E> {
    /// Creates a new [`Request`] to the provided [`Endpoint`] authorized with
    /// the provided [`Token`], if any.
    #[must_use]
    pub fn new(endpoint: E, token: Option<Token>) -> Self {
        Self { endpoint, token }
    }
}

/// [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request cannot be made without a session [`Token`].
    #[display("Not logged in")]
    #[from(ignore)]
    Unauthenticated,

    /// [`Backend`] refused the request.
    #[display("{_0}")]
    Rejected(Rejection),

    /// Response cannot be decoded.
    #[display("Failed to decode response: {_0}")]
    Decode(serde_json::Error),

    #[cfg(feature = "http")]
    /// HTTP transport error.
    #[display("HTTP request failed: {_0}")]
    Transport(reqwest::Error),
}

impl Error {
    /// Indicates whether the request failed because the session is missing or
    /// not accepted by the [`Backend`] anymore.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Unauthenticated => true,
            Self::Rejected(r) => matches!(
                r.status,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
            ),
            Self::Decode(_) => false,
            #[cfg(feature = "http")]
            Self::Transport(_) => false,
        }
    }

    /// Returns the [`Rejection`] of the request, if the [`Backend`] refused
    /// it.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(r) => Some(r),
            Self::Unauthenticated | Self::Decode(_) => None,
            #[cfg(feature = "http")]
            Self::Transport(_) => None,
        }
    }
}

/// Refusal of a request by a [`Backend`], with a non-2xx status.
#[derive(Clone, Debug, Display, Eq, PartialEq, StdError)]
#[display("{message}")]
pub struct Rejection {
    /// [`StatusCode`] of the response.
    pub status: StatusCode,

    /// Human-readable reason, as provided by the [`Backend`].
    pub message: String,
}

impl Rejection {
    /// Creates a new [`Rejection`] with the provided [`StatusCode`] and the
    /// `error` message from the response body, if any.
    #[must_use]
    pub fn new(status: StatusCode, error: Option<String>) -> Self {
        let message = error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        Self { status, message }
    }
}

#[cfg(test)]
mod spec {
    use http::StatusCode;

    use super::{Error, Rejection};

    #[test]
    fn detects_unauthorized_requests() {
        for (status, expected) in [
            (StatusCode::UNAUTHORIZED, true),
            (StatusCode::FORBIDDEN, true),
            (StatusCode::BAD_REQUEST, false),
            (StatusCode::INTERNAL_SERVER_ERROR, false),
        ] {
            let err = Error::Rejected(Rejection::new(status, None));
            assert_eq!(err.is_unauthorized(), expected, "{status}");
        }
        assert!(Error::Unauthenticated.is_unauthorized());
    }

    #[test]
    fn falls_back_to_generic_message() {
        let r =
            Rejection::new(StatusCode::CONFLICT, Some("Email taken".into()));
        assert_eq!(r.to_string(), "Email taken");

        let r = Rejection::new(StatusCode::BAD_GATEWAY, Some("  ".into()));
        assert_eq!(r.to_string(), "Request failed with status 502 Bad Gateway");
    }
}
