//! Store rating read model definitions.

use common::{
    sort::{self, Kind, Order, Sortable, State, Value},
    unit, DateTimeOf,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::domain::rating;

/// Rating of a store, as reviewed by its owner.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Review {
    /// ID of the rating.
    pub id: rating::Id,

    /// Name of the user who rated the store.
    #[serde(rename = "userName")]
    pub user_name: String,

    /// Number of stars given.
    #[serde(default, with = "common::number::serde")]
    pub rating: Option<Decimal>,

    /// [`DateTimeOf`] when the rating was given.
    #[serde(default, with = "common::datetime::serde::lenient_rfc3339")]
    pub created_at: Option<CreationDateTime>,

    /// [`DateTimeOf`] when the rating was last changed.
    #[serde(default, with = "common::datetime::serde::lenient_rfc3339")]
    pub updated_at: Option<UpdateDateTime>,
}

impl Review {
    /// Returns the sorting [`State`] a list of [`Review`]s starts with.
    ///
    /// Owners see the newest and highest ratings first, so every newly
    /// selected [`Field`] is sorted in [`Order::Descending`] first.
    #[must_use]
    pub const fn initial_sorting() -> State<Field> {
        State::starting_with(Order::Descending)
    }

    /// Returns the [`DateTimeOf`] of the last change of this [`Review`], if
    /// it has been changed after being given.
    #[must_use]
    pub fn changed_at(&self) -> Option<UpdateDateTime> {
        let updated_at = self.updated_at?;
        (self.created_at.map(DateTimeOf::coerce) != Some(updated_at))
            .then_some(updated_at)
    }
}

/// [`DateTimeOf`] when a rating was given.
pub type CreationDateTime = DateTimeOf<(Review, unit::Creation)>;

/// [`DateTimeOf`] when a rating was last changed.
pub type UpdateDateTime = DateTimeOf<(Review, unit::Update)>;

/// [`Review`] field a list can be sorted by.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
pub enum Field {
    /// [`Review::user_name`].
    #[strum(to_string = "userName", serialize = "user")]
    UserName,

    /// [`Review::rating`].
    #[strum(serialize = "rating")]
    Rating,

    /// [`Review::created_at`].
    #[strum(to_string = "created_at", serialize = "date")]
    CreatedAt,

    /// [`Review::updated_at`].
    #[strum(serialize = "updated_at")]
    UpdatedAt,
}

impl sort::Field for Field {
    fn kind(self) -> Kind {
        match self {
            Self::UserName => Kind::Text,
            Self::Rating => Kind::Number,
            Self::CreatedAt | Self::UpdatedAt => Kind::Date,
        }
    }
}

impl Sortable for Review {
    type Field = Field;

    fn value(&self, field: Field) -> Value<'_> {
        match field {
            Field::UserName => Value::from(&self.user_name),
            Field::Rating => Value::from(self.rating),
            Field::CreatedAt => Value::from(self.created_at),
            Field::UpdatedAt => Value::from(self.updated_at),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::sort::{self, Order};

    use super::{Field, Review};

    fn reviews() -> Vec<Review> {
        serde_json::from_str(
            r#"[
                {"id": 1, "userName": "Bob", "rating": 3,
                 "created_at": "2024-02-01T10:00:00Z",
                 "updated_at": "2024-02-01T10:00:00Z"},
                {"id": 2, "userName": "alice", "rating": "5",
                 "created_at": "2024-03-01T10:00:00Z",
                 "updated_at": "2024-04-11T08:30:00Z"},
                {"id": 3, "userName": "Carol", "rating": 1,
                 "created_at": "2024-01-01T10:00:00Z",
                 "updated_at": "2024-01-01T10:00:00.000Z"}
            ]"#,
        )
        .unwrap()
    }

    fn users(reviews: &[Review]) -> Vec<&str> {
        reviews.iter().map(|r| r.user_name.as_str()).collect()
    }

    #[test]
    fn starts_descending_and_toggles_to_ascending() {
        let reviews = reviews();

        let (sorted, state) =
            sort::sort_by(&reviews, Field::Rating, &Review::initial_sorting());
        assert_eq!(users(&sorted), ["alice", "Bob", "Carol"]);
        assert_eq!(state.order(), Order::Descending);

        let (sorted, state) = sort::sort_by(&sorted, Field::Rating, &state);
        assert_eq!(users(&sorted), ["Carol", "Bob", "alice"]);
        assert_eq!(state.order(), Order::Ascending);

        let (sorted, state) = sort::sort_by(&sorted, Field::CreatedAt, &state);
        assert_eq!(users(&sorted), ["alice", "Bob", "Carol"]);
        assert_eq!(state.order(), Order::Descending);

        let (sorted, _) = sort::sort_by(
            &sorted,
            Field::UserName,
            &Review::initial_sorting(),
        );
        assert_eq!(users(&sorted), ["alice", "Carol", "Bob"]);
    }

    #[test]
    fn detects_changed_reviews() {
        let reviews = reviews();

        assert_eq!(reviews[0].changed_at(), None);
        assert_eq!(
            reviews[1].changed_at().map(|dt| dt.to_date_string()),
            Some("2024-04-11".to_owned()),
        );
        assert_eq!(reviews[2].changed_at(), None);
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("userName".parse(), Ok(Field::UserName));
        assert_eq!("user".parse(), Ok(Field::UserName));
        assert_eq!("date".parse(), Ok(Field::CreatedAt));
        assert_eq!("rating".parse(), Ok(Field::Rating));
        assert_eq!(Field::CreatedAt.to_string(), "created_at");
    }
}
