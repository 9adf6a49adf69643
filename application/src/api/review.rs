//! Ratings of the owned store.

use service::{
    domain::user::Role,
    query::{self, Query as _},
    read::{self, Review},
};

use crate::{render, AsError, Context, Error};

/// Lists ratings of the store owned by the logged in user, sorted by the
/// provided fields in turn.
pub(super) async fn list(
    ctx: &mut Context,
    sort: Vec<read::rating::Field>,
) -> Result<String, Error> {
    _ = ctx.authorize(&[Role::StoreOwner])?;

    let owner = ctx
        .service()
        .execute(query::dashboard::Owner::default())
        .await
        .map_err(AsError::into_error)?;

    let (reviews, state) =
        super::sorted(owner.ratings, sort, Review::initial_sorting());
    Ok(render::owner(owner.average_rating, &reviews, &state))
}
