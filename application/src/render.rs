//! Rendering of read models as plain text.

use std::fmt;

use common::{
    sort::{self, Order, State},
    DateTimeOf,
};
use itertools::Itertools as _;
use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};
use service::{
    domain::{user::Role, User},
    read::{self, dashboard, Review},
    session::Session,
};

/// Placeholder of an absent value.
const MISSING: &str = "N/A";

/// Number of stars of the highest rating.
const STARS: u8 = 5;

/// Text table with aligned columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Column headings.
    header: Vec<String>,

    /// Cells of every row.
    rows: Vec<Vec<String>>,

    /// Text shown instead of rows when there are none.
    empty: &'static str,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self
            .header
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .chain([h])
                    .map(|c| c.chars().count())
                    .max()
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();
        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{c:<w$}"))
                .join("  ")
                .trim_end()
                .to_owned()
        };

        writeln!(f, "{}", line(&self.header))?;
        writeln!(
            f,
            "{}",
            widths.iter().map(|w| "-".repeat(*w)).join("  "),
        )?;
        if self.rows.is_empty() {
            return writeln!(f, "{}", self.empty);
        }
        for row in &self.rows {
            writeln!(f, "{}", line(row))?;
        }
        Ok(())
    }
}

/// Returns the label of the provided [`Role`], like `STORE OWNER`.
#[must_use]
pub fn role(role: Role) -> String {
    role.as_ref().replace('_', " ").to_uppercase()
}

/// Returns the provided rating with one decimal place, like `3.5`.
#[must_use]
pub fn rating(rating: Option<Decimal>) -> String {
    let rating = rating
        .unwrap_or_default()
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rating:.1}")
}

/// Returns a bar of stars filled up to the provided rating, followed by the
/// rating itself, like `★★★☆☆ (3.4)`.
#[must_use]
pub fn stars(value: Option<Decimal>) -> String {
    let filled = value
        .unwrap_or_default()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or_default()
        .min(STARS);
    format!(
        "{}{} ({})",
        "★".repeat(filled.into()),
        "☆".repeat((STARS - filled).into()),
        rating(value),
    )
}

/// Returns the calendar date of the provided moment, like `2024-01-31`.
#[must_use]
pub fn date<Of: ?Sized>(at: Option<DateTimeOf<Of>>) -> String {
    at.map_or_else(|| MISSING.to_owned(), |at| at.to_date_string())
}

/// Returns the provided optional text, or a placeholder if it's absent or
/// blank.
fn text(value: Option<&String>, missing: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| missing.to_owned(), Clone::clone)
}

/// Returns the heading of a column, marked with the [`Order`] if the column
/// is the sorted one.
fn heading<F: sort::Field>(label: &str, field: F, state: &State<F>) -> String {
    match state.order_of(field) {
        Some(Order::Ascending) => format!("{label} ▲"),
        Some(Order::Descending) => format!("{label} ▼"),
        None => label.to_owned(),
    }
}

/// Renders the profile of the logged in [`User`].
#[must_use]
pub fn profile(session: &Session) -> String {
    let Session { user, claims, .. } = session;
    let User {
        id,
        name,
        email,
        role: user_role,
        rating: owner_rating,
    } = user;

    let mut out = format!(
        "{name} <{email}>\nID: {id}\nRole: {}\nSession expires at: {}\n",
        role(*user_role),
        claims.expires_at.to_rfc3339(),
    );
    if *user_role == Role::StoreOwner {
        out.push_str(&format!("Store rating: {}\n", stars(*owner_rating)));
    }
    out
}

/// Renders the platform totals of an administrator dashboard.
#[must_use]
pub fn stats(stats: &dashboard::Stats) -> String {
    let dashboard::Stats {
        total_users,
        total_stores,
        total_ratings,
    } = stats;
    format!(
        "Total users: {total_users}\n\
         Total stores: {total_stores}\n\
         Total ratings: {total_ratings}\n",
    )
}

/// Renders a list of users as seen by an administrator.
#[must_use]
pub fn users(
    users: &[read::user::list::Entry],
    state: &State<read::user::list::Field>,
) -> Table {
    use read::user::list::Field as F;

    Table {
        header: vec![
            "ID".to_owned(),
            heading("Name", F::Name, state),
            heading("Email", F::Email, state),
            heading("Address", F::Address, state),
            heading("Role", F::Role, state),
            heading("Rating", F::Rating, state),
            heading("Created", F::CreatedAt, state),
        ],
        rows: users
            .iter()
            .map(|u| {
                vec![
                    u.id.to_string(),
                    u.name.clone(),
                    u.email.clone(),
                    text(u.address.as_ref(), MISSING),
                    role(u.role),
                    if u.role == Role::StoreOwner {
                        rating(u.rating)
                    } else {
                        MISSING.to_owned()
                    },
                    date(u.created_at),
                ]
            })
            .collect(),
        empty: "No users found",
    }
}

/// Renders a list of stores as seen by an administrator.
#[must_use]
pub fn stores(
    stores: &[read::store::list::Entry],
    state: &State<read::store::list::Field>,
) -> Table {
    use read::store::list::Field as F;

    Table {
        header: vec![
            "ID".to_owned(),
            heading("Name", F::Name, state),
            heading("Email", F::Email, state),
            heading("Address", F::Address, state),
            heading("Owner", F::OwnerName, state),
            heading("Rating", F::Rating, state),
            heading("Created", F::CreatedAt, state),
        ],
        rows: stores
            .iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.name.clone(),
                    s.email.clone(),
                    text(s.address.as_ref(), MISSING),
                    text(s.owner_name.as_ref(), "No Owner"),
                    stars(s.rating),
                    date(s.created_at),
                ]
            })
            .collect(),
        empty: "No stores found",
    }
}

/// Renders a list of stores as seen by a normal user rating them.
#[must_use]
pub fn rated_stores(
    stores: &[read::store::rated::Entry],
    state: &State<read::store::rated::Field>,
) -> Table {
    use read::store::rated::Field as F;

    Table {
        header: vec![
            "ID".to_owned(),
            heading("Name", F::Name, state),
            heading("Address", F::Address, state),
            heading("Overall Rating", F::AverageRating, state),
            heading("Your Rating", F::UserRating, state),
        ],
        rows: stores
            .iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.name.clone(),
                    text(s.address.as_ref(), MISSING),
                    stars(s.average_rating),
                    s.user_rating.map_or_else(
                        || "Not rated".to_owned(),
                        |r| format!("{}/{STARS}", r.normalize()),
                    ),
                ]
            })
            .collect(),
        empty: "No stores found",
    }
}

/// Renders the average rating and [`Review`]s of a store, as seen by its
/// owner.
#[must_use]
pub fn owner(
    average_rating: Option<Decimal>,
    reviews: &[Review],
    state: &State<read::rating::Field>,
) -> String {
    format!(
        "Average rating: {}\nTotal ratings: {}\n\n{}",
        stars(average_rating),
        reviews.len(),
        self::reviews(reviews, state),
    )
}

/// Renders a list of [`Review`]s.
#[must_use]
pub fn reviews(
    reviews: &[Review],
    state: &State<read::rating::Field>,
) -> Table {
    use read::rating::Field as F;

    Table {
        header: vec![
            heading("User", F::UserName, state),
            heading("Rating", F::Rating, state),
            heading("Submitted", F::CreatedAt, state),
            heading("Updated", F::UpdatedAt, state),
        ],
        rows: reviews
            .iter()
            .map(|r| {
                vec![
                    r.user_name.clone(),
                    r.rating.map_or_else(
                        || MISSING.to_owned(),
                        |v| format!("{}/{STARS}", v.normalize()),
                    ),
                    date(r.created_at),
                    r.changed_at().map_or_else(
                        || "Never updated".to_owned(),
                        |at| at.to_date_string(),
                    ),
                ]
            })
            .collect(),
        empty: "No ratings yet",
    }
}
