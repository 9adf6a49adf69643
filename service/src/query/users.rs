//! [`Query`] collection related to the multiple [`User`]s.

#[cfg(doc)]
use crate::{domain::User, Query};
use crate::{domain::user::Role, infra::backend::endpoint, read};

use super::BackendQuery;

/// Queries a list of [`User`]s matching a [`read::user::list::Filter`].
pub type List = BackendQuery<endpoint::Users>;

impl List {
    /// Creates a new [`List`] of all the [`Role::StoreOwner`]s, to choose an
    /// owner of a new store from.
    #[must_use]
    pub fn store_owners() -> Self {
        Self::by(read::user::list::Filter::by_role(Role::StoreOwner))
    }
}
