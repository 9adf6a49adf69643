//! [`Command`] for creating a [`Session`].

use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

#[cfg(doc)]
use crate::session::Session;
use crate::{
    domain::{
        user::{Credential, Token},
        User,
    },
    infra::{
        backend::{self, endpoint, Request},
        Backend,
    },
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Session`] by [`User`] credentials.
///
/// The created [`Session`] is not stored anywhere, it's up to the caller to
/// log it in.
#[derive(Clone, Debug)]
pub struct CreateUserSession {
    /// Email address of the [`User`].
    pub email: String,

    /// [`Credential`] of the [`User`].
    pub password: SecretBox<Credential>,
}

/// Output of [`CreateUserSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Token`] of the created [`Session`].
    pub token: Token,

    /// [`User`] whose [`Session`] has been created.
    pub user: User,
}

impl<B> Command<CreateUserSession> for Service<B>
where
    B: Backend<
        Request<endpoint::Login>,
        Ok = endpoint::LoginResponse,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUserSession { email, password } = cmd;

        let endpoint::LoginResponse { user, token } = self
            .backend()
            .execute(Request::new(
                endpoint::Login {
                    email: email.trim().to_owned(),
                    password,
                },
                None,
            ))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if token.as_ref().is_empty() {
            return Err(tracerr::new!(E::NoToken));
        }

        Ok(Output { token, user })
    }
}

/// Error of [`CreateUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` request failed: {_0}")]
    Backend(backend::Error),

    /// [`Backend`] authenticated the [`User`] without issuing a [`Token`].
    #[display("No session token issued")]
    NoToken,
}

#[cfg(test)]
mod spec {
    use http::{Method, StatusCode};
    use secrecy::SecretBox;
    use serde_json::json;

    use crate::{
        domain::user::{Role, Token},
        infra::backend::mock::Mock,
        Command as _, Service,
    };

    use super::{CreateUserSession, ExecutionError};

    fn cmd() -> CreateUserSession {
        CreateUserSession {
            email: "  user@example.com ".into(),
            password: SecretBox::new(Box::new("secret".into())),
        }
    }

    #[tokio::test]
    async fn returns_user_and_token() {
        let svc = Service::new(Mock::replying(json!({
            "user": {"id": 5, "name": "Normal User With Long Name",
                     "email": "user@example.com", "role": " normal"},
            "token": "h.p.s",
        })));

        let out = svc.execute(cmd()).await.unwrap();

        assert_eq!(out.token, Token::from("h.p.s"));
        assert_eq!(out.user.role, Role::Normal);

        let calls = svc.backend().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].path, "/auth/login");
        assert_eq!(
            calls[0].params,
            json!({"email": "user@example.com", "password": "secret"}),
        );
        assert_eq!(calls[0].token, None);
    }

    #[tokio::test]
    async fn reports_rejection() {
        let svc = Service::new(Mock::rejecting(
            StatusCode::UNAUTHORIZED,
            "Invalid credentials",
        ));

        let err = svc.execute(cmd()).await.unwrap_err();

        assert_eq!(
            err.as_ref().to_string(),
            "`Backend` request failed: Invalid credentials",
        );
        assert!(matches!(err.as_ref(), ExecutionError::Backend(e)
            if e.rejection().is_some()));
    }

    #[tokio::test]
    async fn requires_token() {
        let svc = Service::new(Mock::replying(json!({
            "user": {"id": 5, "name": "n", "email": "e@x.io", "role": "admin"},
            "token": "",
        })));

        let err = svc.execute(cmd()).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NoToken));
    }
}
