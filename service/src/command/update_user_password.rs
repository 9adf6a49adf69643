//! [`Command`] for updating a [`user::Password`].

use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user,
    infra::{
        backend::{self, endpoint, Request},
        Backend,
    },
    Service,
};

use super::Command;

/// [`Command`] for updating a [`user::Password`] of the logged in [`User`].
#[derive(Clone, Debug)]
pub struct UpdateUserPassword {
    /// Current [`user::Credential`] of the [`User`].
    pub old_password: SecretBox<user::Credential>,

    /// New [`user::Password`] of the [`User`].
    pub new_password: SecretBox<user::Password>,
}

impl<B> Command<UpdateUserPassword> for Service<B>
where
    B: Backend<
        Request<endpoint::ChangePassword>,
        Ok = serde::de::IgnoredAny,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateUserPassword,
    ) -> Result<Self::Ok, Self::Err> {
        let UpdateUserPassword {
            old_password,
            new_password,
        } = cmd;

        self.backend()
            .execute(self.request(endpoint::ChangePassword {
                current: old_password,
                new: new_password,
            }))
            .await
            .map(drop)
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`UpdateUserPassword`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` request failed: {_0}")]
    Backend(backend::Error),
}

#[cfg(test)]
mod spec {
    use http::{Method, StatusCode};
    use secrecy::SecretBox;
    use serde_json::json;

    use crate::{
        domain::user::Token, infra::backend::mock::Mock, Command as _,
        Service,
    };

    use super::{ExecutionError, UpdateUserPassword};

    fn cmd() -> UpdateUserPassword {
        UpdateUserPassword {
            old_password: SecretBox::new(Box::new("legacy".into())),
            new_password: SecretBox::new(Box::new(
                "Newpass1!".parse().unwrap(),
            )),
        }
    }

    #[tokio::test]
    async fn sends_both_passwords_authorized() {
        let svc = Service::new(Mock::replying(json!(null)))
            .authorized(Some(Token::from("t.o.k")));

        svc.execute(cmd()).await.unwrap();

        let calls = svc.backend().calls();
        assert_eq!(calls[0].method, Method::PUT);
        assert_eq!(calls[0].path, "/auth/change-password");
        assert_eq!(
            calls[0].params,
            json!({"currentPassword": "legacy", "newPassword": "Newpass1!"}),
        );
        assert_eq!(calls[0].token, Some(Token::from("t.o.k")));
    }

    #[tokio::test]
    async fn requires_session() {
        let svc = Service::new(Mock::replying(json!(null)));

        let err = svc.execute(cmd()).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Backend(e) if e.is_unauthorized(),
        ));
        assert!(svc.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn reports_wrong_password() {
        let svc = Service::new(Mock::rejecting(
            StatusCode::BAD_REQUEST,
            "Current password is incorrect",
        ))
        .authorized(Some(Token::from("t.o.k")));

        let err = svc.execute(cmd()).await.unwrap_err();

        assert_eq!(
            err.as_ref().to_string(),
            "`Backend` request failed: Current password is incorrect",
        );
    }
}
