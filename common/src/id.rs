//! [`Identifier`] definitions.

use std::{convert::Infallible, str::FromStr};

use derive_more::{Display, From};

/// Opaque identifier assigned by a remote backend.
///
/// Backends are free to represent identifiers either as JSON numbers or as
/// strings, so both are accepted and the original representation is kept for
/// sending the identifier back.
#[derive(Clone, Debug, Display, Eq, From, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(untagged)
)]
pub enum Identifier {
    /// Numeric identifier.
    #[display("{_0}")]
    Number(i64),

    /// Textual identifier.
    #[display("{_0}")]
    Text(String),
}

impl FromStr for Identifier {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_owned()), Self::Number))
    }
}

#[cfg(test)]
mod spec {
    use super::Identifier;

    #[test]
    fn parses_numbers_first() {
        assert_eq!("42".parse(), Ok(Identifier::Number(42)));
        assert_eq!(
            "3f2a".parse(),
            Ok(Identifier::Text("3f2a".to_owned())),
        );
        assert_eq!(Identifier::Number(7).to_string(), "7");
    }
}
