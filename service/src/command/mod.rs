//! [`Command`] definition.

pub mod create_store;
pub mod create_user;
pub mod create_user_session;
pub mod rate_store;
pub mod register_user;
pub mod update_user_password;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_store::CreateStore, create_user::CreateUser,
    create_user_session::CreateUserSession, rate_store::RateStore,
    register_user::RegisterUser, update_user_password::UpdateUserPassword,
};
