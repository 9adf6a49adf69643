//! Client-side session management.
//!
//! A [`Manager`] owns the authenticated identity of the running client along
//! with its bearer [`Token`], and keeps both in a durable [`Storage`], so the
//! [`Session`] survives restarts until it expires or the user logs out.

use std::mem;

use common::{
    operations::{Delete, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::infra::Storage;
use crate::{
    domain::{
        user::{
            session::{DecodeError, ExpirationDateTime},
            Claims, Token,
        },
        User,
    },
    infra::{
        storage::{self, Key, KeyValue},
        Storage as _,
    },
};

/// Authenticated session of a [`User`].
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    /// [`User`] this [`Session`] belongs to.
    pub user: User,

    /// Bearer [`Token`] authorizing requests of the [`User`].
    pub token: Token,

    /// [`Claims`] decoded from the [`Token`].
    pub claims: Claims,
}

/// State of a [`Manager`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum State {
    /// [`Storage`] hasn't been read yet.
    #[default]
    Unknown,

    /// [`Storage`] is being read.
    Restoring,

    /// No [`User`] is logged in.
    Anonymous,

    /// [`User`] is logged in.
    Authenticated(Session),
}

/// Owner of the client [`Session`].
///
/// Construct it once at process start, call [`Manager::restore()`] before
/// anything depends on the [`Session`], and lend it by reference afterwards.
#[derive(Debug)]
pub struct Manager<S> {
    /// [`Storage`] the [`Session`] is persisted into.
    storage: S,

    /// Current [`State`].
    state: State,
}

impl<S> Manager<S> {
    /// Creates a new [`Manager`] over the provided [`Storage`].
    ///
    /// The [`Manager`] is in the [`State::Unknown`] until it's restored.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: State::Unknown,
        }
    }

    /// Returns the current [`State`] of this [`Manager`].
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the current [`Session`], if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            State::Authenticated(session) => Some(session),
            State::Unknown | State::Restoring | State::Anonymous => None,
        }
    }

    /// Returns the [`User`] of the current [`Session`], if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session().map(|s| &s.user)
    }

    /// Returns the [`Token`] of the current [`Session`], if any.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        self.session().map(|s| &s.token)
    }

    /// Destroys this [`Manager`] returning its [`Storage`].
    ///
    /// The persisted [`Session`] is left intact.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: KeyValue> Manager<S> {
    /// Restores the persisted [`Session`], if it's still valid.
    ///
    /// See [`Manager::restore_at()`] for details.
    pub fn restore(&mut self) -> &State {
        self.restore_at(DateTime::now())
    }

    /// Restores the persisted [`Session`], if it's still valid at the
    /// provided moment.
    ///
    /// Never fails: a missing, expired or malformed persisted [`Session`]
    /// results in [`State::Anonymous`], and whatever was persisted is
    /// discarded. The [`Token`] signature is not verified, and no network
    /// request is made.
    pub fn restore_at(&mut self, now: DateTime) -> &State {
        self.state = State::Restoring;

        self.state = match self.load(now) {
            Ok(Some(session)) => {
                log::debug!(
                    user.id = %session.user.id,
                    user.role = %session.user.role,
                    "session restored",
                );
                State::Authenticated(session)
            }
            Ok(None) => State::Anonymous,
            Err(reason) => {
                log::info!("discarding persisted session: {reason}");
                self.clear();
                State::Anonymous
            }
        };
        &self.state
    }

    /// Logs in the provided [`User`] with the provided [`Token`], replacing
    /// any existing [`Session`].
    ///
    /// See [`Manager::login_at()`] for details.
    ///
    /// # Errors
    ///
    /// See [`Manager::login_at()`] for details.
    pub fn login(
        &mut self,
        user: User,
        token: Token,
    ) -> Result<&Session, Traced<LoginError>> {
        self.login_at(user, token, DateTime::now())
    }

    /// Logs in the provided [`User`] with the provided [`Token`] at the
    /// provided moment, replacing any existing [`Session`].
    ///
    /// # Errors
    ///
    /// If the [`Token`] [`Claims`] cannot be decoded, or they're already
    /// expired, or the new [`Session`] cannot be persisted. The current
    /// [`State`] is left untouched in such case.
    pub fn login_at(
        &mut self,
        user: User,
        token: Token,
        now: DateTime,
    ) -> Result<&Session, Traced<LoginError>> {
        use LoginError as E;

        let claims = Claims::decode(&token)
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if claims.is_expired_at(now) {
            return Err(tracerr::new!(E::Expired(claims.expires_at)));
        }

        let raw_user = serde_json::to_string(&user)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        self.storage
            .execute(Insert(vec![
                (Key::Token, token.to_string()),
                (Key::User, raw_user),
            ]))
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!(user.id = %user.id, user.role = %user.role, "logged in");
        self.state = State::Authenticated(Session {
            user,
            token,
            claims,
        });
        match &self.state {
            State::Authenticated(session) => Ok(session),
            State::Unknown | State::Restoring | State::Anonymous => {
                unreachable!("`State::Authenticated` is just set")
            }
        }
    }

    /// Logs out the current [`User`], if any.
    ///
    /// Idempotent.
    ///
    /// # Errors
    ///
    /// If the persisted [`Session`] cannot be erased. The [`State`] is
    /// [`State::Anonymous`] regardless.
    pub fn logout(&mut self) -> Result<(), Traced<storage::Error>> {
        if let State::Authenticated(session) =
            mem::replace(&mut self.state, State::Anonymous)
        {
            log::info!(user.id = %session.user.id, "logged out");
        }
        self.storage
            .execute(Delete(vec![Key::Token, Key::User]))
            .map_err(tracerr::wrap!())
    }

    /// Logs out the current [`User`] if the [`Session`] has expired.
    ///
    /// See [`Manager::revalidate_at()`] for details.
    ///
    /// # Errors
    ///
    /// See [`Manager::revalidate_at()`] for details.
    pub fn revalidate(&mut self) -> Result<&State, Traced<storage::Error>> {
        self.revalidate_at(DateTime::now())
    }

    /// Logs out the current [`User`] if the [`Session`] has expired at the
    /// provided moment.
    ///
    /// # Errors
    ///
    /// If the expired [`Session`] cannot be erased from the [`Storage`]. The
    /// [`State`] is [`State::Anonymous`] regardless.
    pub fn revalidate_at(
        &mut self,
        now: DateTime,
    ) -> Result<&State, Traced<storage::Error>> {
        let expired = self
            .session()
            .is_some_and(|s| s.claims.is_expired_at(now));
        if expired {
            log::info!("session expired");
            self.logout().map_err(tracerr::wrap!())?;
        }
        Ok(&self.state)
    }

    /// Loads the persisted [`Session`], if it's valid at the provided moment.
    fn load(&self, now: DateTime) -> Result<Option<Session>, Discard> {
        let Some(token) = self
            .storage
            .execute(Select(Key::Token))
            .map_err(Discard::Storage)?
        else {
            return Ok(None);
        };
        let token = Token::from(token);

        let claims = Claims::decode(&token).map_err(Discard::Token)?;
        if claims.is_expired_at(now) {
            return Err(Discard::Expired(claims.expires_at));
        }

        let user = self
            .storage
            .execute(Select(Key::User))
            .map_err(Discard::Storage)?
            .ok_or(Discard::NoUser)?;
        let user = serde_json::from_str(&user).map_err(Discard::User)?;

        Ok(Some(Session {
            user,
            token,
            claims,
        }))
    }

    /// Erases the persisted [`Session`], only logging a failure.
    fn clear(&self) {
        let keys = vec![Key::Token, Key::User];
        if let Err(e) = self.storage.execute(Delete(keys)) {
            log::warn!("failed to erase persisted session: {e}");
        }
    }
}

/// Reason of discarding a persisted [`Session`].
#[derive(Debug, Display)]
enum Discard {
    /// [`Storage`] cannot be read.
    #[display("unreadable storage: {_0}")]
    Storage(Traced<storage::Error>),

    /// [`Token`] cannot be decoded.
    #[display("undecodable token: {_0}")]
    Token(Traced<DecodeError>),

    /// [`Token`] has expired.
    #[display("token expired at {}", _0.to_rfc3339())]
    Expired(ExpirationDateTime),

    /// [`User`] is not persisted along with the [`Token`].
    #[display("no user")]
    NoUser,

    /// [`User`] cannot be parsed.
    #[display("malformed user: {_0}")]
    User(serde_json::Error),
}

/// Error of [`Manager::login()`].
#[derive(Debug, Display, Error, From)]
pub enum LoginError {
    /// [`Token`] [`Claims`] cannot be decoded.
    #[display("Invalid session token: {_0}")]
    Token(DecodeError),

    /// [`Token`] has already expired.
    #[display("Session token expired at {}", _0.to_rfc3339())]
    #[from(ignore)]
    Expired(#[error(not(source))] ExpirationDateTime),

    /// [`User`] cannot be serialized.
    #[display("Failed to serialize `User`: {_0}")]
    Serialize(serde_json::Error),

    /// [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
