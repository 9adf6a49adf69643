//! Recording [`Backend`] for tests.

use std::cell::RefCell;

use http::{Method, StatusCode};
use serde_json::Value as Json;
use tracerr::Traced;

use crate::domain::user::Token;

use super::{Backend, Endpoint, Error, Rejection, Request};

/// Request received by a [`Mock`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Call {
    /// [`Endpoint::METHOD`].
    pub(crate) method: Method,

    /// [`Endpoint::PATH`].
    pub(crate) path: &'static str,

    /// Serialized [`Endpoint`].
    pub(crate) params: Json,

    /// Session [`Token`] of the request.
    pub(crate) token: Option<Token>,
}

/// [`Backend`] replying the same to every request and recording them.
#[derive(Debug)]
pub(crate) struct Mock {
    /// Reply to every request.
    reply: Result<Json, Rejection>,

    /// Received requests.
    calls: RefCell<Vec<Call>>,
}

impl Mock {
    /// Creates a [`Mock`] replying with the provided JSON.
    pub(crate) fn replying(reply: Json) -> Self {
        Self {
            reply: Ok(reply),
            calls: RefCell::default(),
        }
    }

    /// Creates a [`Mock`] refusing every request.
    pub(crate) fn rejecting(status: StatusCode, error: &str) -> Self {
        Self {
            reply: Err(Rejection::new(status, Some(error.to_owned()))),
            calls: RefCell::default(),
        }
    }

    /// Returns the received requests.
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl<E: Endpoint> Backend<Request<E>> for Mock {
    type Ok = E::Response;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Request { endpoint, token }: Request<E>,
    ) -> Result<Self::Ok, Self::Err> {
        if E::AUTHORIZED && token.is_none() {
            return Err(tracerr::new!(Error::Unauthenticated));
        }
        self.calls.borrow_mut().push(Call {
            method: E::METHOD,
            path: E::PATH,
            params: serde_json::to_value(&endpoint)
                .map_err(tracerr::from_and_wrap!(=> Error))?,
            token,
        });
        match &self.reply {
            Ok(json) => serde_json::from_value(json.clone())
                .map_err(tracerr::from_and_wrap!(=> Error)),
            Err(rejection) => {
                Err(tracerr::new!(Error::Rejected(rejection.clone())))
            }
        }
    }
}
