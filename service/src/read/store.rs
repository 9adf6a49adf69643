//! Store read models definitions.

pub mod list {
    //! Stores list definitions, as managed by an administrator.

    use common::{
        sort::{self, Kind, Sortable, Value},
        unit, DateTimeOf,
    };
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};
    use strum::{Display, EnumString};

    use crate::domain::store;

    /// Store as listed for an administrator.
    #[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
    pub struct Entry {
        /// ID of the store.
        pub id: store::Id,

        /// Name of the store.
        pub name: String,

        /// Contact email address of the store.
        pub email: String,

        /// Address of the store, if provided.
        #[serde(default)]
        pub address: Option<String>,

        /// Name of the store owner, if the store has one.
        #[serde(default)]
        pub owner_name: Option<String>,

        /// Average rating of the store.
        #[serde(default, with = "common::number::serde")]
        pub rating: Option<Decimal>,

        /// [`DateTimeOf`] when the store was created.
        #[serde(default, with = "common::datetime::serde::lenient_rfc3339")]
        pub created_at: Option<CreationDateTime>,
    }

    /// [`DateTimeOf`] when a store was created.
    pub type CreationDateTime = DateTimeOf<(Entry, unit::Creation)>;

    /// [`Entry`] field a list can be sorted by.
    #[derive(
        Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq,
    )]
    #[strum(serialize_all = "snake_case")]
    pub enum Field {
        /// [`Entry::name`].
        Name,

        /// [`Entry::email`].
        Email,

        /// [`Entry::address`].
        Address,

        /// [`Entry::owner_name`].
        OwnerName,

        /// [`Entry::rating`].
        Rating,

        /// [`Entry::created_at`].
        CreatedAt,
    }

    impl sort::Field for Field {
        fn kind(self) -> Kind {
            match self {
                Self::Name | Self::Email | Self::Address | Self::OwnerName => {
                    Kind::Text
                }
                Self::Rating => Kind::Number,
                Self::CreatedAt => Kind::Date,
            }
        }
    }

    impl Sortable for Entry {
        type Field = Field;

        fn value(&self, field: Field) -> Value<'_> {
            match field {
                Field::Name => Value::from(&self.name),
                Field::Email => Value::from(&self.email),
                Field::Address => Value::from(self.address.as_ref()),
                Field::OwnerName => Value::from(self.owner_name.as_ref()),
                Field::Rating => Value::from(self.rating),
                Field::CreatedAt => Value::from(self.created_at),
            }
        }
    }

    /// Filter of a stores list.
    #[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
    pub struct Filter {
        /// Text to search in names and addresses.
        ///
        /// Empty means no search.
        pub search: String,
    }
}

pub mod rated {
    //! Stores list definitions, as seen by a normal user rating them.

    use common::sort::{self, Kind, Sortable, Value};
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};
    use strum::{Display, EnumString};

    use crate::domain::store;

    pub use super::list::Filter;

    /// Store along with its ratings.
    #[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
    pub struct Entry {
        /// ID of the store.
        pub id: store::Id,

        /// Name of the store.
        pub name: String,

        /// Address of the store, if provided.
        #[serde(default)]
        pub address: Option<String>,

        /// Average rating of the store among all users.
        #[serde(
            default,
            rename = "averageRating",
            with = "common::number::serde"
        )]
        pub average_rating: Option<Decimal>,

        /// Rating given to the store by the current user, if any.
        #[serde(default, rename = "userRating", with = "common::number::serde")]
        pub user_rating: Option<Decimal>,
    }

    /// [`Entry`] field a list can be sorted by.
    #[derive(
        Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq,
    )]
    pub enum Field {
        /// [`Entry::name`].
        #[strum(serialize = "name")]
        Name,

        /// [`Entry::address`].
        #[strum(serialize = "address")]
        Address,

        /// [`Entry::average_rating`].
        #[strum(to_string = "averageRating", serialize = "rating")]
        AverageRating,

        /// [`Entry::user_rating`].
        #[strum(serialize = "userRating")]
        UserRating,
    }

    impl sort::Field for Field {
        fn kind(self) -> Kind {
            match self {
                Self::Name | Self::Address => Kind::Text,
                Self::AverageRating | Self::UserRating => Kind::Number,
            }
        }
    }

    impl Sortable for Entry {
        type Field = Field;

        fn value(&self, field: Field) -> Value<'_> {
            match field {
                Field::Name => Value::from(&self.name),
                Field::Address => Value::from(self.address.as_ref()),
                Field::AverageRating => Value::from(self.average_rating),
                Field::UserRating => Value::from(self.user_rating),
            }
        }
    }

    #[cfg(test)]
    mod spec {
        use common::sort::{self, Order, State};
        use rust_decimal::Decimal;

        use super::{Entry, Field};

        fn names(stores: &[Entry]) -> Vec<&str> {
            stores.iter().map(|s| s.name.as_str()).collect()
        }

        #[test]
        fn sorts_by_average_rating_numerically() {
            let stores = serde_json::from_str::<Vec<Entry>>(
                r#"[
                    {"id": 1, "name": "Alpha", "averageRating": "10.0"},
                    {"id": 2, "name": "Beta", "averageRating": 9},
                    {"id": 3, "name": "Gamma", "averageRating": null,
                     "userRating": 4},
                    {"id": 4, "name": "Delta", "averageRating": "4.50"}
                ]"#,
            )
            .unwrap();
            assert_eq!(stores[3].average_rating, Some(Decimal::new(450, 2)));
            assert_eq!(stores[2].user_rating, Some(Decimal::from(4)));

            let (sorted, state) = sort::sort_by(
                &stores,
                Field::AverageRating,
                &State::default(),
            );
            assert_eq!(names(&sorted), ["Gamma", "Delta", "Beta", "Alpha"]);
            assert_eq!(state.order(), Order::Ascending);

            let (sorted, state) =
                sort::sort_by(&sorted, Field::AverageRating, &state);
            assert_eq!(names(&sorted), ["Alpha", "Beta", "Delta", "Gamma"]);
            assert_eq!(state.order(), Order::Descending);
        }

        #[test]
        fn parses_field_names() {
            assert_eq!("averageRating".parse(), Ok(Field::AverageRating));
            assert_eq!("rating".parse(), Ok(Field::AverageRating));
            assert_eq!(Field::AverageRating.to_string(), "averageRating");
            assert_eq!("name".parse(), Ok(Field::Name));
        }
    }
}
