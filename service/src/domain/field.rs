//! Form field values shared by [`User`]s and [`Store`]s.
//!
//! Every value here can only be constructed when it satisfies its rules, so
//! an invalid form never reaches the backend.
//!
//! [`Store`]: crate::read::store::list::Entry
//! [`User`]: crate::domain::User

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
use regex::Regex;
use serde::Serialize;

/// Name of a [`User`] or a [`Store`].
///
/// Must be between 20 and 60 characters long.
///
/// [`Store`]: crate::read::store::list::Entry
/// [`User`]: crate::domain::User
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Minimal number of characters in a [`Name`].
    pub const MIN_LEN: usize = 20;

    /// Maximal number of characters in a [`Name`].
    pub const MAX_LEN: usize = 60;

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        (Self::MIN_LEN..=Self::MAX_LEN)
            .contains(&name.as_ref().chars().count())
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("Name must be between 20 and 60 characters")
    }
}

/// Email address of a [`User`] or a [`Store`].
///
/// [`Store`]: crate::read::store::list::Entry
/// [`User`]: crate::domain::User
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Returns this [`Email`] lower-cased.
    #[must_use]
    pub fn to_lowercase(&self) -> Self {
        Self(self.0.to_lowercase())
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format: non-whitespace
        /// segments separated by `@` and at least one `.` in the domain.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim()).ok_or("Invalid email format")
    }
}

/// Postal address of a [`User`] or a [`Store`].
///
/// Must not exceed 400 characters.
///
/// [`Store`]: crate::read::store::list::Entry
/// [`User`]: crate::domain::User
#[derive(AsRef, Clone, Debug, Default, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Maximal number of characters in an [`Address`].
    pub const MAX_LEN: usize = 400;

    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        address.as_ref().chars().count() <= Self::MAX_LEN
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("Address must not exceed 400 characters")
    }
}
