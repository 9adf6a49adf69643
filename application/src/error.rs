//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    command::{
        create_store, create_user, create_user_session, rate_store,
        register_user, update_user_password,
    },
    infra::{backend, storage},
    session::LoginError,
};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// User-facing [`Error`] of a command.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Creates a new [`Error`] with the provided `code` and `message`.
    #[must_use]
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for backend::Error {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Unauthenticated => Some(AuthError::NotLoggedIn.into()),
            Self::Rejected(_) if self.is_unauthorized() => {
                Some(AuthError::SessionRejected.into())
            }
            Self::Rejected(r) => Some(Error::new("REJECTED", &r.message)),
            Self::Transport(e) => Some(Error::new(
                "UNREACHABLE",
                format!("Backend is unreachable: {e}"),
            )),
            Self::Decode(_) => None,
        }
    }
}

impl AsError for storage::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for LoginError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Token(_) | Self::Expired(_) => {
                Some(Error::new("INVALID_SESSION", self.to_string()))
            }
            Self::Serialize(_) | Self::Storage(_) => None,
        }
    }
}

impl AsError for create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            // Wrong credentials are rejected with `401` too.
            Self::Backend(backend::Error::Rejected(r)) => {
                Some(Error::new("LOGIN_FAILED", &r.message))
            }
            Self::Backend(e) => e.try_as_error(),
            Self::NoToken => Some(Error::new("LOGIN_FAILED", self.to_string())),
        }
    }
}

impl AsError for register_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(backend::Error::Rejected(r)) => {
                Some(Error::new("REGISTRATION_FAILED", &r.message))
            }
            Self::Backend(e) => e.try_as_error(),
        }
    }
}

impl AsError for update_user_password::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
        }
    }
}

impl AsError for create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
        }
    }
}

impl AsError for create_store::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
        }
    }
}

impl AsError for rate_store::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
        }
    }
}

define_error! {
    enum AuthError {
        #[code = "NOT_LOGGED_IN"]
        #[message = "Not logged in, run `login` first"]
        NotLoggedIn,

        #[code = "SESSION_REJECTED"]
        #[message = "Session is no longer valid, run `login` again"]
        SessionRejected,

        #[code = "FORBIDDEN"]
        #[message = "Not available for the role of the logged in user"]
        Forbidden,
    }
}
