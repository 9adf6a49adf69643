//! [`Session`]-related commands.
//!
//! [`Session`]: service::session::Session

use secrecy::SecretBox;
use service::{
    command::{self, Command as _},
    domain::user::{self, Credential, Password},
};
use tracing as log;

use crate::{render, AsError, Context, Error};

/// Logs in with the provided credentials, replacing the current session.
pub(super) async fn login(
    ctx: &mut Context,
    email: String,
    password: Credential,
) -> Result<String, Error> {
    let command::create_user_session::Output { token, user } = ctx
        .service()
        .execute(command::CreateUserSession {
            email,
            password: SecretBox::new(Box::new(password)),
        })
        .await
        .map_err(AsError::into_error)?;

    let session = ctx
        .session_mut()
        .login(user, token)
        .map_err(AsError::into_error)?;
    Ok(format!(
        "Logged in as {} ({})\n",
        session.user.name,
        render::role(session.user.role),
    ))
}

/// Logs out, forgetting the persisted session.
pub(super) fn logout(ctx: &mut Context) -> Result<String, Error> {
    ctx.session_mut().logout().map_err(AsError::into_error)?;
    Ok("Logged out\n".to_owned())
}

/// Shows the logged in user.
pub(super) fn whoami(ctx: &mut Context) -> Result<String, Error> {
    ctx.current_session().map(render::profile)
}

/// Registers a new normal user.
pub(super) async fn register(
    ctx: &mut Context,
    name: user::Name,
    email: user::Email,
    password: Password,
    address: user::Address,
) -> Result<String, Error> {
    ctx.service()
        .execute(command::RegisterUser {
            name,
            email,
            password: SecretBox::new(Box::new(password)),
            address,
        })
        .await
        .map_err(AsError::into_error)?;
    log::info!("registered a new user");
    Ok("Registered successfully, run `login` to continue\n".to_owned())
}

/// Changes the password of the logged in user.
pub(super) async fn change_password(
    ctx: &mut Context,
    current: Credential,
    new: Password,
) -> Result<String, Error> {
    _ = ctx.current_session()?;
    ctx.service()
        .execute(command::UpdateUserPassword {
            old_password: SecretBox::new(Box::new(current)),
            new_password: SecretBox::new(Box::new(new)),
        })
        .await
        .map_err(AsError::into_error)?;
    Ok("Password updated\n".to_owned())
}
