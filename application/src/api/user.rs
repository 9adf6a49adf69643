//! Users management commands.

use secrecy::SecretBox;
use service::{
    command::{self, Command as _},
    domain::user::Role,
    query::{self, Query as _},
    read,
};

use crate::{args::Users, render, AsError, Context, Error};

/// Executes the provided [`Users`] command.
pub(super) async fn execute(
    ctx: &mut Context,
    cmd: Users,
) -> Result<String, Error> {
    _ = ctx.authorize(&[Role::Admin])?;
    let service = ctx.service();

    match cmd {
        Users::List { search, role, sort } => {
            let users = service
                .execute(query::users::List::by(read::user::list::Filter {
                    search,
                    role,
                }))
                .await
                .map_err(AsError::into_error)?;

            let (users, state) =
                super::sorted(users, sort, Default::default());
            Ok(render::users(&users, &state).to_string())
        }
        Users::Create {
            name,
            email,
            password,
            address,
            role,
        } => {
            service
                .execute(command::CreateUser {
                    name,
                    email,
                    password: SecretBox::new(Box::new(password)),
                    address,
                    role,
                })
                .await
                .map_err(AsError::into_error)?;
            Ok(format!("Created a new {} user\n", render::role(role)))
        }
    }
}
