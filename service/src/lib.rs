//! Service contains the client-side logic of the store rating application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod session;

#[cfg(all(test, not(feature = "http")))]
use wiremock as _;

use crate::{domain::user::Token, infra::backend::Request};
#[cfg(doc)]
use crate::infra::Backend;

pub use self::{command::Command, query::Query};

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<B> {
    /// [`Backend`] of this [`Service`].
    backend: B,

    /// Session [`Token`] authorizing [`Backend`] requests.
    token: Option<Token>,
}

impl<B> Service<B> {
    /// Creates a new anonymous [`Service`] over the provided [`Backend`].
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            token: None,
        }
    }

    /// Authorizes all the [`Backend`] requests of this [`Service`] with the
    /// provided session [`Token`], if any.
    #[must_use]
    pub fn authorized(self, token: Option<Token>) -> Self {
        Self { token, ..self }
    }

    /// Returns [`Backend`] of this [`Service`].
    #[must_use]
    pub(crate) const fn backend(&self) -> &B {
        &self.backend
    }

    /// Creates a new [`Request`] to the provided `endpoint` authorized with
    /// the session [`Token`] of this [`Service`].
    fn request<E>(&self, endpoint: E) -> Request<E> {
        Request::new(endpoint, self.token.clone())
    }
}
