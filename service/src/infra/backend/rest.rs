//! REST [`Backend`] implementation over HTTP.

use std::time::Duration;

use derive_more::Debug;
use http::Method;
use serde::Deserialize;
use serde_json::Value as Json;
use tracerr::Traced;
use tracing as log;

use super::{Backend, Endpoint, Error, Rejection, Request};

/// [`Rest`] backend configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the REST API, every [`Endpoint::PATH`] is appended to.
    pub url: String,

    /// Maximum [`Duration`] of a single request.
    pub timeout: Duration,
}

/// [`Backend`] reached over HTTP.
#[derive(Clone, Debug)]
pub struct Rest {
    /// HTTP client performing requests.
    #[debug(skip)]
    client: reqwest::Client,

    /// Base URL of the REST API, without a trailing slash.
    base_url: String,
}

impl Rest {
    /// Creates a new [`Rest`] backend with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the HTTP client cannot be initialized.
    pub fn new(conf: &Config) -> Result<Self, Traced<Error>> {
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .user_agent(concat!("store-rating/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        Ok(Self {
            client,
            base_url: conf.url.trim_end_matches('/').to_owned(),
        })
    }

    /// Returns the full URL of the provided [`Endpoint`].
    fn url<E: Endpoint>(&self) -> String {
        format!("{}{}", self.base_url, E::PATH)
    }
}

impl<E: Endpoint> Backend<Request<E>> for Rest {
    type Ok = E::Response;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Request { endpoint, token }: Request<E>,
    ) -> Result<Self::Ok, Self::Err> {
        if E::AUTHORIZED && token.is_none() {
            return Err(tracerr::new!(Error::Unauthenticated));
        }

        let mut req = self.client.request(E::METHOD, self.url::<E>());
        if let Some(token) = &token {
            req = req.bearer_auth(token);
        }
        req = if E::METHOD == Method::GET {
            let pairs = query(&endpoint)
                .map_err(tracerr::from_and_wrap!(=> Error))?;
            req.query(&pairs)
        } else {
            req.json(&endpoint)
        };

        log::debug!(method = %E::METHOD, path = E::PATH, "backend request");
        let resp = req
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        if !status.is_success() {
            let rejection = Rejection::new(
                status,
                serde_json::from_slice::<ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.error),
            );
            log::debug!(
                method = %E::METHOD,
                path = E::PATH,
                %status,
                "backend rejected request: {rejection}",
            );
            return Err(tracerr::new!(Error::Rejected(rejection)));
        }

        let body: &[u8] = if body.trim_ascii().is_empty() {
            b"null"
        } else {
            &body
        };
        serde_json::from_slice(body)
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

/// Body of a non-2xx response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    /// Human-readable reason of the failure.
    #[serde(default)]
    error: Option<String>,
}

/// Converts the provided [`Endpoint`] into query string pairs.
///
/// Strings are passed as is, absent values are omitted.
fn query<E: Endpoint>(
    endpoint: &E,
) -> Result<Vec<(String, String)>, serde_json::Error> {
    Ok(match serde_json::to_value(endpoint)? {
        Json::Object(fields) => fields
            .into_iter()
            .filter_map(|(k, v)| match v {
                Json::Null => None,
                Json::String(s) => Some((k, s)),
                v @ (Json::Bool(_)
                | Json::Number(_)
                | Json::Array(_)
                | Json::Object(_)) => Some((k, v.to_string())),
            })
            .collect(),
        Json::Null
        | Json::Bool(_)
        | Json::Number(_)
        | Json::String(_)
        | Json::Array(_) => Vec::new(),
    })
}
