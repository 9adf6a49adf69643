//! Dashboard of the logged in user.

use futures::future;
use service::{
    domain::user::Role,
    query::{self, Query as _},
    read::Review,
};

use crate::{render, AsError, Context, Error};

/// Shows the dashboard of the logged in user, depending on their [`Role`].
pub(super) async fn show(ctx: &mut Context) -> Result<String, Error> {
    let role = ctx.current_session()?.user.role;
    let service = ctx.service();

    match role {
        Role::Admin => {
            let (stats, users, stores) = future::try_join3(
                service.execute(query::dashboard::Stats::default()),
                service.execute(query::users::List::default()),
                service.execute(query::stores::List::default()),
            )
            .await
            .map_err(AsError::into_error)?;

            Ok(format!(
                "{}\nUsers\n{}\nStores\n{}",
                render::stats(&stats),
                render::users(&users, &Default::default()),
                render::stores(&stores, &Default::default()),
            ))
        }
        Role::Normal => {
            let stores = service
                .execute(query::stores::Rated::default())
                .await
                .map_err(AsError::into_error)?;
            Ok(render::rated_stores(&stores, &Default::default()).to_string())
        }
        Role::StoreOwner => {
            let owner = service
                .execute(query::dashboard::Owner::default())
                .await
                .map_err(AsError::into_error)?;
            Ok(render::owner(
                owner.average_rating,
                &owner.ratings,
                &Review::initial_sorting(),
            ))
        }
    }
}
