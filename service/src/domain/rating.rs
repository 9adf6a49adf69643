//! Store rating definitions.

use std::{fmt, str::FromStr};

use common::Identifier;
use derive_more::{Display, From, Into};
use serde::{de, Deserialize, Deserializer, Serialize};

/// ID of a rating.
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

/// Value of a rating given to a store: a whole number of stars.
///
/// Must be between [`Value::MIN`] and [`Value::MAX`] inclusively.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Value(u8);

impl Value {
    /// Minimal [`Value`].
    pub const MIN: u8 = 1;

    /// Maximal [`Value`].
    pub const MAX: u8 = 5;

    /// Creates a new [`Value`] if the given number of `stars` is in range.
    #[must_use]
    pub fn new(stars: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&stars).then_some(Self(stars))
    }

    /// Returns the number of stars of this [`Value`].
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl FromStr for Value {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or("Rating must be a whole number between 1 and 5")
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// [`de::Visitor`] accepting in range integers.
        struct Stars;

        impl de::Visitor<'_> for Stars {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let (min, max) = (Value::MIN, Value::MAX);
                write!(f, "an integer between {min} and {max}")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(Value::new)
                    .ok_or_else(|| {
                        E::invalid_value(de::Unexpected::Unsigned(v), &self)
                    })
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(Value::new)
                    .ok_or_else(|| {
                        E::invalid_value(de::Unexpected::Signed(v), &self)
                    })
            }
        }

        deserializer.deserialize_u8(Stars)
    }
}
