//! Stores commands.

use std::str::FromStr;

use service::{
    command::{self, Command as _},
    domain::{rating, user::Role},
    query::{self, Query as _},
    read,
};

use crate::{args::Stores, render, AsError, Context, Error};

/// Executes the provided [`Stores`] command.
pub(super) async fn execute(
    ctx: &mut Context,
    cmd: Stores,
) -> Result<String, Error> {
    match cmd {
        Stores::List { search, sort } => list(ctx, search, &sort).await,
        Stores::Create {
            name,
            email,
            address,
            owner_id,
        } => {
            _ = ctx.authorize(&[Role::Admin])?;
            let service = ctx.service();
            if let Some(id) = &owner_id {
                let owners = service
                    .execute(query::users::List::store_owners())
                    .await
                    .map_err(AsError::into_error)?;
                let id = id.to_string();
                if !owners.iter().any(|o| o.id.to_string() == id) {
                    return Err(Error::new(
                        "NOT_STORE_OWNER",
                        format!("User {id} is not a store owner"),
                    ));
                }
            }
            service
                .execute(command::CreateStore {
                    name,
                    email,
                    address,
                    owner_id,
                })
                .await
                .map_err(AsError::into_error)?;
            Ok("Store created\n".to_owned())
        }
        Stores::Rate { store_id, rating } => {
            _ = ctx.authorize(&[Role::Normal])?;
            let msg = format!(
                "Rated store {store_id} with {}/{}\n",
                rating.stars(),
                rating::Value::MAX,
            );
            ctx.service()
                .execute(command::RateStore { store_id, rating })
                .await
                .map_err(AsError::into_error)?;
            Ok(msg)
        }
    }
}

/// Lists stores matching the provided `search`, as seen by the logged in
/// user.
///
/// An administrator sees the management list, while a normal user sees the
/// ratings.
async fn list(
    ctx: &mut Context,
    search: String,
    sort: &[String],
) -> Result<String, Error> {
    let role = ctx.authorize(&[Role::Admin, Role::Normal])?.user.role;
    let filter = read::store::list::Filter { search };
    let service = ctx.service();

    if role == Role::Admin {
        let stores = service
            .execute(query::stores::List::by(filter))
            .await
            .map_err(AsError::into_error)?;
        let (stores, state) =
            super::sorted(stores, fields(sort)?, Default::default());
        Ok(render::stores(&stores, &state).to_string())
    } else {
        let stores = service
            .execute(query::stores::Rated::by(filter))
            .await
            .map_err(AsError::into_error)?;
        let (stores, state) =
            super::sorted(stores, fields(sort)?, Default::default());
        Ok(render::rated_stores(&stores, &state).to_string())
    }
}

/// Parses the provided sorting `fields`.
fn fields<F: FromStr>(fields: &[String]) -> Result<Vec<F>, Error> {
    fields
        .iter()
        .map(|f| {
            f.parse().map_err(|_| {
                let msg = format!("Cannot sort by `{f}`");
                Error::new("INVALID_SORT_FIELD", msg)
            })
        })
        .collect()
}
