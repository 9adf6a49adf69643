//! [`User`] definitions.

pub mod session;

use std::{str::FromStr, sync::LazyLock};

use common::Identifier;
use derive_more::{AsRef, Display, From, Into};
use regex::Regex;
use rust_decimal::Decimal;
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{de, Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, EnumString};

pub use super::field::{Address, Email, Name};
pub use self::session::{Claims, Token};

/// Authenticated platform user, as known by the client.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// Name of this [`User`].
    pub name: String,

    /// Email address of this [`User`].
    pub email: String,

    /// [`Role`] of this [`User`].
    pub role: Role,

    /// Average rating of the store owned by this [`User`].
    ///
    /// Only present for [`Role::StoreOwner`]s.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "common::number::serde"
    )]
    pub rating: Option<Decimal>,
}

/// ID of a [`User`].
#[derive(
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(Identifier);

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty `user::Id`");
        }
        Ok(Self(s.parse().unwrap_or_else(|e| match e {})))
    }
}

/// Role of a [`User`], deciding which dashboard is shown.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    strum::Display,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// Platform administrator managing users and stores.
    Admin,

    /// Normal user rating stores.
    Normal,

    /// Owner of a store, reviewing its ratings.
    StoreOwner,
}

impl<'de> Deserialize<'de> for Role {
    /// Deserializes a [`Role`] ignoring whitespace surrounding it, as the
    /// backend may return it with one.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse().map_err(|_| {
            de::Error::unknown_variant(
                raw.trim(),
                &["admin", "normal", "store_owner"],
            )
        })
    }
}

/// Password of a [`User`].
///
/// Must be between 8 and 16 characters long, and contain at least one
/// uppercase letter and one of `!@#$%^&*` characters.
#[derive(AsRef, Clone, Debug, Eq, PartialEq)]
#[as_ref(str)]
pub struct Password(String);

impl Password {
    /// Minimal number of characters in a [`Password`].
    pub const MIN_LEN: usize = 8;

    /// Maximal number of characters in a [`Password`].
    pub const MAX_LEN: usize = 16;

    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).is_ok().then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    ///
    /// # Errors
    ///
    /// Returns the description of the first violated rule.
    pub fn check(password: impl AsRef<str>) -> Result<(), &'static str> {
        /// Regular expression matching an uppercase letter.
        static UPPERCASE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new("[A-Z]").expect("valid regex"));

        /// Regular expression matching a special character.
        static SPECIAL: LazyLock<Regex> =
            LazyLock::new(|| Regex::new("[!@#$%^&*]").expect("valid regex"));

        let password = password.as_ref();
        if !(Self::MIN_LEN..=Self::MAX_LEN)
            .contains(&password.chars().count())
        {
            return Err("Password must be between 8 and 16 characters");
        }
        if !UPPERCASE.is_match(password) || !SPECIAL.is_match(password) {
            return Err(
                "Password must include at least one uppercase letter and one \
                 special character",
            );
        }
        Ok(())
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::check(s).map(|()| Self(s.to_owned()))
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Credential of a [`User`] as typed on login.
///
/// Unlike a [`Password`], no rules are enforced, since accounts may predate
/// the current ones.
#[derive(AsRef, Clone, Debug, Eq, From, PartialEq)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Credential(String);

impl CloneableSecret for Credential {}
impl Zeroize for Credential {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod spec {
    use common::Identifier;
    use rust_decimal::Decimal;

    use super::{Id, Password, Role, User};

    #[test]
    fn password_rules() {
        assert_eq!(
            Password::check("abc12345"),
            Err(
                "Password must include at least one uppercase letter and one \
                 special character",
            ),
        );
        assert!(Password::check("Abc123!@").is_ok());

        assert_eq!(
            Password::check("Ab!"),
            Err("Password must be between 8 and 16 characters"),
        );
        assert_eq!(
            Password::check("Abcdefgh!12345678"),
            Err("Password must be between 8 and 16 characters"),
        );
        assert!(Password::check("Abcdefgh!1234567").is_ok());

        assert!(Password::check("abcdefg!").is_err());
        assert!(Password::check("ABCDEFGH").is_err());
        assert!(Password::check("ABCDEFG(").is_err());
        assert!("Abcdefg&".parse::<Password>().is_ok());
    }

    #[test]
    fn role_is_trimmed() {
        for (raw, expected) in [
            (r#""admin""#, Role::Admin),
            (r#"" normal ""#, Role::Normal),
            (r#""store_owner\n""#, Role::StoreOwner),
        ] {
            assert_eq!(
                serde_json::from_str::<Role>(raw).unwrap(),
                expected,
                "{raw}",
            );
        }

        assert!(serde_json::from_str::<Role>(r#""owner""#).is_err());
        assert_eq!(
            serde_json::to_string(&Role::StoreOwner).unwrap(),
            r#""store_owner""#,
        );
    }

    #[test]
    fn user_roundtrips_through_storage_format() {
        let user = serde_json::from_str::<User>(
            r#"{
                "id": 7,
                "name": "Store Owner With A Long Name",
                "email": "owner@example.com",
                "role": "  store_owner ",
                "rating": "4.25",
                "address": "ignored"
            }"#,
        )
        .unwrap();

        assert_eq!(user.id, Id::from(Identifier::Number(7)));
        assert_eq!(user.role, Role::StoreOwner);
        assert_eq!(user.rating, Some(Decimal::new(425, 2)));

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains(r#""role":"store_owner""#), "{json}");
        assert_eq!(serde_json::from_str::<User>(&json).unwrap(), user);

        let admin = serde_json::from_str::<User>(
            r#"{"id":"a1","name":"Admin","email":"a@b.c","role":"admin"}"#,
        )
        .unwrap();
        assert_eq!(admin.rating, None);
        assert!(!serde_json::to_string(&admin).unwrap().contains("rating"));
    }
}
