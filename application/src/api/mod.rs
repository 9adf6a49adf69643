//! Command line API of the [`Service`].
//!
//! [`Service`]: crate::Service

mod dashboard;
mod review;
mod session;
mod store;
mod user;

use common::sort::{self, Sortable, State};

use crate::{args::Command, Context, Error};

/// Executes the provided [`Command`] in the provided [`Context`].
///
/// Returns the text to show to the user.
///
/// # Errors
///
/// If the [`Command`] fails or isn't allowed for the logged in user.
pub async fn execute(cmd: Command, ctx: &mut Context) -> Result<String, Error> {
    match cmd {
        Command::Login { email, password } => {
            session::login(ctx, email, password).await
        }
        Command::Logout => session::logout(ctx),
        Command::Whoami => session::whoami(ctx),
        Command::Register {
            name,
            email,
            password,
            address,
        } => session::register(ctx, name, email, password, address).await,
        Command::Password { current, new } => {
            session::change_password(ctx, current, new).await
        }
        Command::Dashboard => dashboard::show(ctx).await,
        Command::Users(cmd) => user::execute(ctx, cmd).await,
        Command::Stores(cmd) => store::execute(ctx, cmd).await,
        Command::Reviews { sort } => review::list(ctx, sort).await,
    }
}

/// Sorts the provided `records` by every one of the provided `fields` in
/// turn, starting from the `initial` [`State`].
///
/// Repeating a field toggles its order, like clicking a column heading
/// again.
fn sorted<T: Sortable>(
    mut records: Vec<T>,
    fields: impl IntoIterator<Item = T::Field>,
    initial: State<T::Field>,
) -> (Vec<T>, State<T::Field>) {
    let state = fields.into_iter().fold(initial, |state, field| {
        sort::sort_in_place(&mut records, field, &state)
    });
    (records, state)
}

#[cfg(test)]
mod spec {
    use common::sort::{Order, State};
    use serde_json::json;
    use service::read::{self, Review};

    use super::sorted;

    #[test]
    fn applies_sorting_in_turn() {
        use read::user::list::Field as F;

        let users = serde_json::from_value::<Vec<read::user::list::Entry>>(
            json!([
                {"id": 1, "name": "b", "email": "z@x.io", "role": "admin"},
                {"id": 2, "name": "a", "email": "y@x.io", "role": "normal"},
                {"id": 3, "name": "c", "email": "x@x.io", "role": "normal"},
            ]),
        )
        .unwrap();
        let names = |users: &[read::user::list::Entry]| {
            users.iter().map(|u| u.name.clone()).collect::<Vec<_>>()
        };

        let (once, state) =
            sorted(users.clone(), [F::Name], State::default());
        assert_eq!(names(&once), ["a", "b", "c"]);
        assert_eq!(state.order_of(F::Name), Some(Order::Ascending));

        let (twice, state) =
            sorted(users.clone(), [F::Name, F::Name], State::default());
        assert_eq!(names(&twice), ["c", "b", "a"]);
        assert_eq!(state.order_of(F::Name), Some(Order::Descending));

        let (other, state) =
            sorted(users, [F::Name, F::Name, F::Email], State::default());
        assert_eq!(names(&other), ["c", "a", "b"]);
        assert_eq!(state.order_of(F::Email), Some(Order::Ascending));
    }

    #[test]
    fn keeps_order_without_sorting() {
        let reviews = serde_json::from_value::<Vec<Review>>(json!([
            {"id": 1, "userName": "b", "rating": 1},
            {"id": 2, "userName": "a", "rating": 5},
        ]))
        .unwrap();

        let (same, state) =
            sorted(reviews.clone(), [], Review::initial_sorting());

        assert_eq!(same, reviews);
        assert_eq!(state.field(), None);
    }
}
