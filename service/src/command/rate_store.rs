//! [`Command`] for rating a store.

use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{rating, store},
    infra::{
        backend::{self, endpoint, Request},
        Backend,
    },
    Service,
};

use super::Command;

/// [`Command`] for submitting or updating a [`rating::Value`] of a store by
/// the logged in [`User`].
///
/// The backend keeps a single rating per [`User`] and store, so submitting
/// again overwrites the previous one.
#[derive(Clone, Debug)]
pub struct RateStore {
    /// ID of the rated store.
    pub store_id: store::Id,

    /// [`rating::Value`] given to the store.
    pub rating: rating::Value,
}

impl<B> Command<RateStore> for Service<B>
where
    B: Backend<
        Request<endpoint::Rate>,
        Ok = serde::de::IgnoredAny,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RateStore) -> Result<Self::Ok, Self::Err> {
        let RateStore { store_id, rating } = cmd;

        self.backend()
            .execute(self.request(endpoint::Rate { store_id, rating }))
            .await
            .map(drop)
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`RateStore`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` request failed: {_0}")]
    Backend(backend::Error),
}

#[cfg(test)]
mod spec {
    use http::{Method, StatusCode};
    use serde_json::json;

    use crate::{
        domain::user::Token, infra::backend::mock::Mock, Command as _,
        Service,
    };

    use super::{ExecutionError, RateStore};

    fn cmd() -> RateStore {
        RateStore {
            store_id: "s-1".parse().unwrap(),
            rating: "4".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn posts_rating() {
        let svc = Service::new(Mock::replying(json!({"message": "saved"})))
            .authorized(Some(Token::from("use.r.tok")));

        svc.execute(cmd()).await.unwrap();

        let calls = svc.backend().calls();
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].path, "/ratings");
        assert_eq!(calls[0].params, json!({"storeId": "s-1", "rating": 4}));
    }

    #[tokio::test]
    async fn reports_missing_store() {
        let svc =
            Service::new(Mock::rejecting(StatusCode::NOT_FOUND, "Not found"))
                .authorized(Some(Token::from("use.r.tok")));

        let err = svc.execute(cmd()).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Backend(e)
                if e.rejection().is_some_and(|r| r.message == "Not found"),
        ));
    }
}
