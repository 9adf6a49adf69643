//! [`DateTimeOf`] definitions.

use std::{cmp::Ordering, fmt, marker::PhantomData, ops, time::Duration};

use derive_more::{Display, Error};
use time::{format_description::well_known::Rfc3339, OffsetDateTime, UtcOffset};

/// [`DateTimeOf`] of no particular kind.
pub type DateTime = DateTimeOf;

/// Moment in time, always kept in UTC.
///
/// `Of` tells what the moment is of (like a creation of some entity), so
/// moments of different kinds cannot be mixed up accidentally. Use
/// [`DateTimeOf::coerce()`] to convert between them explicitly.
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Moment in UTC.
    utc: OffsetDateTime,

    /// Kind of this moment.
    kind: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Wraps the provided moment, converting it into UTC.
    fn at(moment: OffsetDateTime) -> Self {
        Self {
            utc: moment.to_offset(UtcOffset::UTC),
            kind: PhantomData,
        }
    }

    /// Returns the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self::at(OffsetDateTime::now_utc())
    }

    /// Returns the moment the provided number of seconds after the Unix
    /// epoch.
    ///
    /// [`None`] is returned if the timestamp is out of range.
    #[must_use]
    pub fn from_unix_timestamp(secs: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(secs).ok().map(Self::at)
    }

    /// Returns the number of whole seconds elapsed since the Unix epoch.
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.utc.unix_timestamp()
    }

    /// Parses an [RFC 3339] date and time in any offset.
    ///
    /// # Errors
    ///
    /// If the `input` is not an [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        OffsetDateTime::parse(input.trim(), &Rfc3339)
            .map(Self::at)
            .map_err(ParseError)
    }

    /// Formats this moment as an [RFC 3339] date and time in UTC.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        // Only years beyond 9999 are not representable.
        self.utc
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.utc.to_string())
    }

    /// Formats the UTC calendar date of this moment as `YYYY-MM-DD`.
    #[must_use]
    pub fn to_date_string(&self) -> String {
        let (year, month, day) = self.utc.to_calendar_date();
        format!("{year:04}-{:02}-{day:02}", u8::from(month))
    }

    /// Converts this moment into a moment of another kind.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            utc: self.utc,
            kind: PhantomData,
        }
    }
}

/// Error of parsing a [`DateTimeOf`].
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid RFC 3339 date and time: {_0}")]
pub struct ParseError(time::error::Parse);

impl<Of: ?Sized> fmt::Debug for DateTimeOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DateTimeOf({})", self.to_rfc3339())
    }
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.utc == other.utc
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc.cmp(&other.utc)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> ops::Add<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self::at(self.utc + rhs)
    }
}

impl<Of: ?Sized> ops::Sub<Duration> for DateTimeOf<Of> {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self {
        Self::at(self.utc - rhs)
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    //! [`serde`] representations of a [`DateTimeOf`].

    use super::DateTimeOf;

    pub mod unix_timestamp {
        //! [`DateTimeOf`] as a number of seconds since the Unix epoch, like
        //! the `exp` claim of a [JWT].
        //!
        //! Fractional seconds are accepted and truncated.
        //!
        //! [JWT]: https://datatracker.ietf.org/doc/html/rfc7519#section-2

        use serde::{de, Deserialize, Deserializer, Serializer};

        use super::DateTimeOf;

        /// Number of seconds, as found in the wild.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Seconds {
            /// Whole seconds.
            Whole(i64),

            /// Fractional seconds.
            Fractional(f64),
        }

        /// Serializes a [`DateTimeOf`] as whole seconds.
        ///
        /// # Errors
        ///
        /// If the `serializer` fails.
        pub fn serialize<Of, S>(
            dt: &DateTimeOf<Of>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            Of: ?Sized,
        {
            serializer.serialize_i64(dt.unix_timestamp())
        }

        /// Deserializes a [`DateTimeOf`] from whole or fractional seconds.
        ///
        /// # Errors
        ///
        /// If the value is not a number, or it's out of range.
        pub fn deserialize<'de, D, Of>(
            deserializer: D,
        ) -> Result<DateTimeOf<Of>, D::Error>
        where
            D: Deserializer<'de>,
            Of: ?Sized,
        {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "saturating truncation is intended"
            )]
            let secs = match Seconds::deserialize(deserializer)? {
                Seconds::Whole(secs) => secs,
                Seconds::Fractional(secs) => secs.trunc() as i64,
            };
            DateTimeOf::from_unix_timestamp(secs).ok_or_else(|| {
                de::Error::custom(format!("timestamp {secs} is out of range"))
            })
        }
    }

    pub mod lenient_rfc3339 {
        //! Optional [`DateTimeOf`] as an [RFC 3339] string.
        //!
        //! Anything but a valid string is read as [`None`], so a single
        //! malformed date doesn't break a whole list.
        //!
        //! [RFC 3339]: https://tools.ietf.org/html/rfc3339

        use serde::{de::IgnoredAny, Deserialize, Deserializer, Serializer};

        use super::DateTimeOf;

        /// Raw value of a date.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            /// Possibly a date.
            Text(String),

            /// Definitely not a date.
            Other(IgnoredAny),
        }

        /// Serializes an optional [`DateTimeOf`] as an [RFC 3339] string or
        /// `null`.
        ///
        /// # Errors
        ///
        /// If the `serializer` fails.
        ///
        /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
        pub fn serialize<Of, S>(
            dt: &Option<DateTimeOf<Of>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            Of: ?Sized,
        {
            match dt {
                Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional [`DateTimeOf`] from any value.
        ///
        /// # Errors
        ///
        /// Only if the `deserializer` itself fails.
        pub fn deserialize<'de, D, Of>(
            deserializer: D,
        ) -> Result<Option<DateTimeOf<Of>>, D::Error>
        where
            D: Deserializer<'de>,
            Of: ?Sized,
        {
            Ok(match Raw::deserialize(deserializer)? {
                Raw::Text(s) => DateTimeOf::from_rfc3339(&s).ok(),
                Raw::Other(IgnoredAny) => None,
            })
        }
    }
}
