//! [`Query`] definition.

pub mod dashboard;
pub mod stores;
pub mod users;

use tracerr::Traced;

use crate::{
    infra::{
        backend::{self, Endpoint, Request},
        Backend,
    },
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] fetching an [`Endpoint::Response`] from a [`Backend`].
#[derive(Clone, Copy, Debug, Default)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct BackendQuery<E>(E);

impl<E> BackendQuery<E> {
    /// Creates a new [`BackendQuery`] fetching an [`Endpoint`] by the
    /// provided filter.
    #[must_use]
    pub fn by<F>(filter: F) -> Self
    where
        E: From<F>,
    {
        Self(filter.into())
    }
}

impl<B, E> Query<BackendQuery<E>> for Service<B>
where
    E: Endpoint,
    B: Backend<Request<E>, Ok = E::Response, Err = Traced<backend::Error>>,
{
    type Ok = E::Response;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        BackendQuery(endpoint): BackendQuery<E>,
    ) -> Result<Self::Ok, Self::Err> {
        self.backend()
            .execute(self.request(endpoint))
            .await
            .map_err(tracerr::wrap!())
    }
}
