//! Store definitions.

use std::str::FromStr;

use common::Identifier;
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

pub use super::field::{Address, Email, Name};

/// ID of a store.
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
            return Err("empty `store::Id`");
        }
        Ok(Self(s.parse().unwrap_or_else(|e| match e {})))
    }
}

#[cfg(test)]
mod spec {
    use common::Identifier;

    use super::Id;

    #[test]
    fn keeps_backend_representation() {
        let id = serde_json::from_str::<Id>("12").unwrap();
        assert_eq!(id, Id::from(Identifier::Number(12)));
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");

        let id = serde_json::from_str::<Id>(r#""6650f1""#).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""6650f1""#);

        assert_eq!(" 12 ".parse::<Id>(), Ok(Id::from(Identifier::Number(12))));
        assert!("  ".parse::<Id>().is_err());
    }
}
