//! [`Context`]-related definitions.

use service::{
    domain::user::Role,
    infra::Rest,
    session::{Session, State},
};
use tracing as log;

use crate::{error::AuthError, Error, Service, SessionManager};

/// Context every command is executed in.
#[derive(Debug)]
pub struct Context {
    /// [`Rest`] backend to build [`Service`]s over.
    backend: Rest,

    /// [`SessionManager`] owning the current [`Session`].
    session: SessionManager,
}

impl Context {
    /// Creates a new [`Context`], restoring the persisted [`Session`], if
    /// any.
    #[must_use]
    pub fn new(backend: Rest, mut session: SessionManager) -> Self {
        _ = session.restore();
        Self { backend, session }
    }

    /// Returns a [`Service`] authorized with the current [`Session`], if
    /// any.
    #[must_use]
    pub fn service(&self) -> Service {
        Service::new(self.backend.clone())
            .authorized(self.session.token().cloned())
    }

    /// Returns the [`SessionManager`] of this [`Context`].
    pub fn session_mut(&mut self) -> &mut SessionManager {
        &mut self.session
    }

    /// Returns the current [`Session`].
    ///
    /// # Errors
    ///
    /// If nobody is logged in, or the [`Session`] has expired since it was
    /// restored.
    pub fn current_session(&mut self) -> Result<&Session, Error> {
        let state = self.session.revalidate().map_err(|e| {
            log::warn!("failed to erase expired session: {e}");
        });
        match state {
            Ok(State::Authenticated(session)) => Ok(session),
            Ok(State::Unknown | State::Restoring | State::Anonymous)
            | Err(()) => Err(AuthError::NotLoggedIn.into()),
        }
    }

    /// Returns the current [`Session`] if its user has one of the provided
    /// [`Role`]s.
    ///
    /// # Errors
    ///
    /// If nobody is logged in, or the logged in user has another [`Role`].
    pub fn authorize(&mut self, roles: &[Role]) -> Result<&Session, Error> {
        let session = self.current_session()?;
        if roles.contains(&session.user.role) {
            Ok(session)
        } else {
            Err(AuthError::Forbidden.into())
        }
    }
}
