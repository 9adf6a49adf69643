//! Lenient numeric values.

use rust_decimal::Decimal;

/// Coerces an optional number into a [`Decimal`], treating absence as zero.
#[must_use]
pub fn or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

/// Parses the provided string as a [`Decimal`], ignoring surrounding
/// whitespace.
///
/// [`None`] is returned if the string is not a number.
#[must_use]
pub fn parse(s: &str) -> Option<Decimal> {
    let s = s.trim();
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

#[cfg(feature = "serde")]
pub mod serde {
    //! Module providing lenient deserialization of an optional [`Decimal`].
    //!
    //! JSON numbers and numeric strings are accepted. `null`, absent and
    //! non-numeric values are deserialized as [`None`].

    use std::fmt;

    use rust_decimal::Decimal;
    use serde::{
        de::{self, IgnoredAny, Visitor},
        Deserializer, Serializer,
    };

    /// Serializes the optional [`Decimal`] as a JSON string.
    ///
    /// # Errors
    ///
    /// Never errors on its own, only propagates `serializer` errors.
    pub fn serialize<S>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_str(&d.to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional [`Decimal`] leniently.
    ///
    /// # Errors
    ///
    /// Only propagates `deserializer` errors.
    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(Lenient)
    }

    /// [`Visitor`] accepting anything and keeping only numbers.
    struct Lenient;

    impl<'de> Visitor<'de> for Lenient {
        type Value = Option<Decimal>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number, a numeric string or null")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(Decimal::from(v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(Decimal::from(v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Decimal::try_from(v).ok())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(super::parse(v))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, d: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            d.deserialize_any(self)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{or_zero, parse};

    #[test]
    fn parses_numeric_strings() {
        assert_eq!(parse("4.50"), Some(Decimal::new(45, 1)));
        assert_eq!(parse(" 3 "), Some(Decimal::from(3)));
        assert_eq!(parse("1e2"), Some(Decimal::from(100)));
        assert_eq!(parse(""), None);
        assert_eq!(parse("four"), None);
    }

    #[test]
    fn absence_is_zero() {
        assert_eq!(or_zero(None), Decimal::ZERO);
        assert_eq!(or_zero(parse("2")), Decimal::from(2));
    }
}
