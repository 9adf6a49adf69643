//! [`Command`] for registering a new [`User`].

use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{user::Role, User};
use crate::{
    domain::user,
    infra::{
        backend::{self, endpoint, Request},
        Backend,
    },
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Role::Normal`] [`User`].
///
/// No [`Session`] is created, the [`User`] has to log in afterwards.
///
/// [`Session`]: crate::session::Session
#[derive(Clone, Debug)]
pub struct RegisterUser {
    /// Name of the [`User`].
    pub name: user::Name,

    /// Email address of the [`User`].
    pub email: user::Email,

    /// [`user::Password`] of the [`User`].
    pub password: SecretBox<user::Password>,

    /// Address of the [`User`].
    pub address: user::Address,
}

impl<B> Command<RegisterUser> for Service<B>
where
    B: Backend<
        Request<endpoint::Register>,
        Ok = serde::de::IgnoredAny,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RegisterUser) -> Result<Self::Ok, Self::Err> {
        let RegisterUser {
            name,
            email,
            password,
            address,
        } = cmd;

        self.backend()
            .execute(Request::new(
                endpoint::Register {
                    name,
                    email,
                    password,
                    address,
                },
                None,
            ))
            .await
            .map(drop)
            .map_err(tracerr::map_from_and_wrap!(=> ExecutionError))
    }
}

/// Error of [`RegisterUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` request failed: {_0}")]
    Backend(backend::Error),
}
