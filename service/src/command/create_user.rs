//! [`Command`] for creating a new [`User`] by an administrator.

use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user::{self, Role},
    infra::{
        backend::{self, endpoint, Request},
        Backend,
    },
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`] of any [`Role`].
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// Name of the [`User`].
    pub name: user::Name,

    /// Email address of the [`User`].
    ///
    /// Lower-cased before being sent.
    pub email: user::Email,

    /// [`user::Password`] of the [`User`].
    pub password: SecretBox<user::Password>,

    /// Address of the [`User`].
    pub address: user::Address,

    /// [`Role`] of the [`User`].
    pub role: Role,
}

impl<B> Command<CreateUser> for Service<B>
where
    B: Backend<
        Request<endpoint::CreateUser>,
        Ok = serde::de::IgnoredAny,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        let CreateUser {
            name,
            email,
            password,
            address,
            role,
        } = cmd;

        self.backend()
            .execute(self.request(endpoint::CreateUser {
                name,
                email: email.to_lowercase(),
                password,
                address,
                role,
            }))
            .await
            .map(drop)
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` request failed: {_0}")]
    Backend(backend::Error),
}

#[cfg(test)]
mod spec {
    use http::StatusCode;
    use secrecy::SecretBox;
    use serde_json::json;

    use crate::{
        domain::user::{Role, Token},
        infra::backend::mock::Mock,
        Command as _, Service,
    };

    use super::{CreateUser, ExecutionError};

    fn cmd(role: Role) -> CreateUser {
        CreateUser {
            name: "Store Owner With A Long Name".parse().unwrap(),
            email: " Owner@Example.COM".parse().unwrap(),
            password: SecretBox::new(Box::new("Owner123!".parse().unwrap())),
            address: "".parse().unwrap(),
            role,
        }
    }

    #[tokio::test]
    async fn sends_lowercased_email_and_role() {
        let svc = Service::new(Mock::replying(json!({"id": 12})))
            .authorized(Some(Token::from("adm.in.tok")));

        svc.execute(cmd(Role::StoreOwner)).await.unwrap();

        let calls = svc.backend().calls();
        assert_eq!(calls[0].path, "/admin/users");
        assert_eq!(
            calls[0].params,
            json!({
                "name": "Store Owner With A Long Name",
                "email": "owner@example.com",
                "password": "Owner123!",
                "address": "",
                "role": "store_owner",
            }),
        );
        assert_eq!(calls[0].token, Some(Token::from("adm.in.tok")));
    }

    #[tokio::test]
    async fn reports_forbidden() {
        let svc = Service::new(Mock::rejecting(
            StatusCode::FORBIDDEN,
            "Access denied",
        ))
        .authorized(Some(Token::from("use.r.tok")));

        let err = svc.execute(cmd(Role::Admin)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Backend(e) if e.is_unauthorized(),
        ));
    }
}
