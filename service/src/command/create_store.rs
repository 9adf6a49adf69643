//! [`Command`] for creating a new store by an administrator.

use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{user::Role, User};
use crate::{
    domain::{store, user},
    infra::{
        backend::{self, endpoint, Request},
        Backend,
    },
    Service,
};

use super::Command;

/// [`Command`] for creating a new store, optionally owned by a
/// [`Role::StoreOwner`] [`User`].
#[derive(Clone, Debug)]
pub struct CreateStore {
    /// Name of the store.
    pub name: store::Name,

    /// Email address of the store.
    ///
    /// Lower-cased before being sent.
    pub email: store::Email,

    /// Address of the store.
    pub address: store::Address,

    /// ID of the [`User`] owning the store, if any.
    pub owner_id: Option<user::Id>,
}

impl<B> Command<CreateStore> for Service<B>
where
    B: Backend<
        Request<endpoint::CreateStore>,
        Ok = serde::de::IgnoredAny,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateStore) -> Result<Self::Ok, Self::Err> {
        let CreateStore {
            name,
            email,
            address,
            owner_id,
        } = cmd;

        self.backend()
            .execute(self.request(endpoint::CreateStore {
                name,
                email: email.to_lowercase(),
                address,
                owner_id,
            }))
            .await
            .map(drop)
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`CreateStore`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` request failed: {_0}")]
    Backend(backend::Error),
}

#[cfg(test)]
mod spec {
    use http::StatusCode;
    use serde_json::json;

    use crate::{
        domain::user::Token, infra::backend::mock::Mock, Command as _,
        Service,
    };

    use super::CreateStore;

    fn cmd(owner: Option<&str>) -> CreateStore {
        CreateStore {
            name: "Corner Grocery And Bakery".parse().unwrap(),
            email: "Shop@Corner.io".parse().unwrap(),
            address: "1 Main st.".parse().unwrap(),
            owner_id: owner.map(|id| id.parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn sends_owner() {
        let svc = Service::new(Mock::replying(json!({"id": 4})))
            .authorized(Some(Token::from("adm.in.tok")));

        svc.execute(cmd(Some("9"))).await.unwrap();
        svc.execute(cmd(None)).await.unwrap();

        let calls = svc.backend().calls();
        assert_eq!(calls[0].path, "/admin/stores");
        assert_eq!(
            calls[0].params,
            json!({
                "name": "Corner Grocery And Bakery",
                "email": "shop@corner.io",
                "address": "1 Main st.",
                "owner_id": 9,
            }),
        );
        assert_eq!(calls[1].params["owner_id"], json!(null));
    }

    #[tokio::test]
    async fn reports_rejection() {
        let svc = Service::new(Mock::rejecting(
            StatusCode::BAD_REQUEST,
            "Store already exists",
        ))
        .authorized(Some(Token::from("adm.in.tok")));

        let err = svc.execute(cmd(None)).await.unwrap_err();

        assert_eq!(
            err.as_ref().to_string(),
            "`Backend` request failed: Store already exists",
        );
    }
}
