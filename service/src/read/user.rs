//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

pub mod list {
    //! [`User`]s list definitions.

    use common::{
        sort::{self, Kind, Sortable, Value},
        unit, DateTimeOf,
    };
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};
    use strum::{Display, EnumString};

    use crate::domain::user::{self, Role};
    #[cfg(doc)]
    use crate::domain::User;

    /// [`User`] as listed for an administrator.
    #[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
    pub struct Entry {
        /// ID of the [`User`].
        pub id: user::Id,

        /// Name of the [`User`].
        pub name: String,

        /// Email address of the [`User`].
        pub email: String,

        /// Address of the [`User`], if provided.
        #[serde(default)]
        pub address: Option<String>,

        /// [`Role`] of the [`User`].
        pub role: Role,

        /// Average rating of the store owned by the [`User`].
        #[serde(default, with = "common::number::serde")]
        pub rating: Option<Decimal>,

        /// [`DateTimeOf`] when the [`User`] was created.
        #[serde(default, with = "common::datetime::serde::lenient_rfc3339")]
        pub created_at: Option<CreationDateTime>,
    }

    /// [`DateTimeOf`] when a [`User`] was created.
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

        /// [`Entry::role`].
        Role,

        /// [`Entry::rating`].
        Rating,

        /// [`Entry::created_at`].
        CreatedAt,
    }

    impl sort::Field for Field {
        fn kind(self) -> Kind {
            match self {
                Self::Name | Self::Email | Self::Address | Self::Role => {
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
                Field::Role => Value::from(self.role.as_ref()),
                Field::Rating => Value::from(self.rating),
                Field::CreatedAt => Value::from(self.created_at),
            }
        }
    }

    /// Filter of a [`User`]s list.
    #[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
    pub struct Filter {
        /// Text to search in names, emails and addresses.
        ///
        /// Empty means no search.
        pub search: String,

        /// [`Role`] the listed [`User`]s must have.
        ///
        /// [`None`] means all of them.
        #[serde(serialize_with = "serialize_role")]
        pub role: Option<Role>,
    }

    impl Filter {
        /// Creates a [`Filter`] selecting all the [`User`]s of the provided
        /// [`Role`].
        #[must_use]
        pub fn by_role(role: Role) -> Self {
            Self {
                search: String::new(),
                role: Some(role),
            }
        }
    }

    /// Serializes an absent [`Role`] as an empty string, as the backend
    /// expects.
    fn serialize_role<S>(
        role: &Option<Role>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(role.as_ref().map_or("", AsRef::as_ref))
    }

    #[cfg(test)]
    mod spec {
        use common::sort::{self, Order, State};
        use rust_decimal::Decimal;

        use crate::domain::user::Role;

        use super::{Entry, Field, Filter};

        fn entries() -> Vec<Entry> {
            serde_json::from_str(
                r#"[
                    {"id": 1, "name": "b", "email": "b@x.io",
                     "role": "normal", "created_at": "2024-05-01T00:00:00Z"},
                    {"id": 2, "name": "a", "email": "c@x.io",
                     "role": "store_owner", "rating": "4.50",
                     "address": "Main st.",
                     "created_at": "2024-01-01T00:00:00.000Z"},
                    {"id": 3, "name": "a", "email": "a@x.io",
                     "role": "admin", "rating": null,
                     "created_at": "invalid"}
                ]"#,
            )
            .unwrap()
        }

        fn ids(entries: &[Entry]) -> Vec<String> {
            entries.iter().map(|e| e.id.to_string()).collect()
        }

        #[test]
        fn reads_backend_entries_leniently() {
            let entries = entries();

            assert_eq!(entries[1].rating, Some(Decimal::new(450, 2)));
            assert_eq!(entries[2].rating, None);
            assert_eq!(entries[0].address, None);
            assert!(entries[0].created_at.is_some());
            assert!(entries[2].created_at.is_none());
        }

        #[test]
        fn sorts_by_columns() {
            let (sorted, state) =
                sort::sort_by(&entries(), Field::Name, &State::default());
            assert_eq!(ids(&sorted), ["2", "3", "1"]);
            assert_eq!(state.order(), Order::Ascending);

            let (sorted, state) = sort::sort_by(&sorted, Field::Name, &state);
            assert_eq!(ids(&sorted), ["1", "2", "3"]);
            assert_eq!(state.order(), Order::Descending);

            let (sorted, _) =
                sort::sort_by(&entries(), Field::Rating, &State::default());
            assert_eq!(ids(&sorted), ["1", "3", "2"]);

            let (sorted, _) =
                sort::sort_by(&entries(), Field::CreatedAt, &State::default());
            assert_eq!(ids(&sorted), ["3", "2", "1"]);

            let (sorted, _) =
                sort::sort_by(&entries(), Field::Role, &State::default());
            assert_eq!(ids(&sorted), ["3", "1", "2"]);
        }

        #[test]
        fn parses_field_names() {
            assert_eq!("created_at".parse(), Ok(Field::CreatedAt));
            assert_eq!("email".parse(), Ok(Field::Email));
            assert!("createdAt".parse::<Field>().is_err());
        }

        #[test]
        fn filter_serializes_absent_role_as_empty() {
            let all = Filter {
                search: "shop".into(),
                role: None,
            };
            assert_eq!(
                serde_json::to_value(&all).unwrap(),
                serde_json::json!({"search": "shop", "role": ""}),
            );

            assert_eq!(
                serde_json::to_value(Filter::by_role(Role::StoreOwner))
                    .unwrap(),
                serde_json::json!({"search": "", "role": "store_owner"}),
            );
        }
    }
}
