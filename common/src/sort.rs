//! Client-side sorting of record collections.
//!
//! Every record type exposes its sortable fields as a small [`Field`] enum,
//! each declaring the [`Kind`] of its values. Sorting a collection by a field
//! coerces the record [`Value`]s according to that [`Kind`], so records with
//! loosely typed data (numbers sent as strings, missing values) still order
//! deterministically.
//!
//! Sorting is always stable: records with equal keys keep their relative
//! order, in both directions.

use std::{borrow::Cow, cmp::Ordering, mem};

use rust_decimal::Decimal;
use strum::{Display, EnumString};

use crate::{number, DateTime};

/// Direction of sorting.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    #[strum(serialize = "asc")]
    Ascending,

    /// Descending order.
    #[strum(serialize = "desc")]
    Descending,
}

impl Order {
    /// Returns the opposite [`Order`].
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Applies this [`Order`] to the ascending `ordering`.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Kind of values a [`Field`] holds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// Compared as case-sensitive strings, by code points.
    Text,

    /// Compared as numbers, absent and non-numeric values being zero.
    Number,

    /// Compared as points in time.
    Date,
}

/// Sortable field of a record.
pub trait Field: Copy + Eq {
    /// Returns the [`Kind`] of values this [`Field`] holds.
    fn kind(self) -> Kind;
}

/// Record which can be sorted by its [`Field`]s.
pub trait Sortable {
    /// [`Field`]s this record can be sorted by.
    type Field: Field;

    /// Returns the raw [`Value`] of the provided `field`.
    fn value(&self, field: Self::Field) -> Value<'_>;
}

/// Raw value of a record [`Field`], as provided by the record itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'a> {
    /// Textual value.
    Text(&'a str),

    /// Numeric value.
    Number(Decimal),

    /// Date and time value.
    Date(DateTime),

    /// No value.
    Missing,
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Self::Text(s)
    }
}

impl From<Decimal> for Value<'_> {
    fn from(n: Decimal) -> Self {
        Self::Number(n)
    }
}

impl<Of: ?Sized> From<crate::DateTimeOf<Of>> for Value<'_> {
    fn from(dt: crate::DateTimeOf<Of>) -> Self {
        Self::Date(dt.coerce())
    }
}

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Missing, Into::into)
    }
}

/// Comparison key of a [`Value`] coerced to a [`Kind`].
///
/// All the keys of a single [`Field`] share the same variant.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum Key<'a> {
    /// [`Kind::Text`] key.
    Text(Option<Cow<'a, str>>),

    /// [`Kind::Number`] key.
    Number(Decimal),

    /// [`Kind::Date`] key.
    Date(Option<DateTime>),
}

impl<'a> Key<'a> {
    /// Coerces the provided [`Value`] into a [`Key`] of the provided [`Kind`].
    fn new(kind: Kind, value: Value<'a>) -> Self {
        match kind {
            Kind::Text => Self::Text(match value {
                Value::Text(s) => Some(Cow::Borrowed(s)),
                Value::Number(n) => Some(Cow::Owned(n.normalize().to_string())),
                Value::Date(dt) => Some(Cow::Owned(dt.to_rfc3339())),
                Value::Missing => None,
            }),
            Kind::Number => Self::Number(number::or_zero(match value {
                Value::Text(s) => number::parse(s),
                Value::Number(n) => Some(n),
                Value::Date(dt) => Some(Decimal::from(dt.unix_timestamp())),
                Value::Missing => None,
            })),
            Kind::Date => Self::Date(match value {
                Value::Text(s) => DateTime::from_rfc3339(s).ok(),
                Value::Date(dt) => Some(dt),
                Value::Number(_) | Value::Missing => None,
            }),
        }
    }
}

/// Sorting state of a single collection.
///
/// Remembers the last sorted [`Field`] and [`Order`], so the next sort of the
/// same [`Field`] toggles the [`Order`], while sorting another [`Field`]
/// starts over from the initial [`Order`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct State<F> {
    /// Last sorted [`Field`], if any.
    field: Option<F>,

    /// [`Order`] the last sort was performed in.
    order: Order,

    /// [`Order`] every newly selected [`Field`] is sorted in first.
    initial: Order,
}

impl<F> Default for State<F> {
    fn default() -> Self {
        Self::starting_with(Order::Ascending)
    }
}

impl<F> State<F> {
    /// Creates a new [`State`] sorting every newly selected [`Field`] in the
    /// `initial` [`Order`] first.
    #[must_use]
    pub const fn starting_with(initial: Order) -> Self {
        Self {
            field: None,
            order: initial,
            initial,
        }
    }

    /// Returns the [`Order`] of the last sort.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }
}

impl<F: Field> State<F> {
    /// Returns the last sorted [`Field`], if any.
    #[must_use]
    pub fn field(&self) -> Option<F> {
        self.field
    }

    /// Returns the [`Order`] the provided `field` is currently sorted in, if
    /// it's the last sorted one.
    #[must_use]
    pub fn order_of(&self, field: F) -> Option<Order> {
        (self.field == Some(field)).then_some(self.order)
    }

    /// Returns the [`State`] after sorting by the provided `field`.
    #[must_use]
    pub fn next(&self, field: F) -> Self {
        let order = if self.field == Some(field) && self.order == self.initial
        {
            self.initial.reverse()
        } else {
            self.initial
        };
        Self {
            field: Some(field),
            order,
            initial: self.initial,
        }
    }
}

/// Returns the stable permutation of `records` ordering them by the provided
/// `field` in the provided `order`.
///
/// The `i`-th element of the result is the index in `records` of the record
/// which goes `i`-th.
#[must_use]
pub fn permutation<T: Sortable>(
    records: &[T],
    field: T::Field,
    order: Order,
) -> Vec<usize> {
    let kind = field.kind();
    let mut keyed = records
        .iter()
        .map(|r| Key::new(kind, r.value(field)))
        .enumerate()
        .collect::<Vec<_>>();
    // `sort_by` is stable, and reversing `Ordering::Equal` keeps it equal.
    keyed.sort_by(|(_, a), (_, b)| order.apply(a.cmp(b)));
    keyed.into_iter().map(|(i, _)| i).collect()
}

/// Sorts `records` by the provided `field`, deciding the [`Order`] from the
/// `previous` [`State`] of the same collection.
///
/// Returns the sorted records along with the new [`State`] to be passed to
/// the next invocation.
#[must_use]
pub fn sort_by<T>(
    records: &[T],
    field: T::Field,
    previous: &State<T::Field>,
) -> (Vec<T>, State<T::Field>)
where
    T: Sortable + Clone,
{
    let state = previous.next(field);
    let sorted = permutation(records, field, state.order)
        .into_iter()
        .map(|i| records[i].clone())
        .collect();
    (sorted, state)
}

/// Sorts `records` in place by the provided `field`, deciding the [`Order`]
/// from the `previous` [`State`] of the same collection.
///
/// Returns the new [`State`] to be passed to the next invocation.
pub fn sort_in_place<T: Sortable>(
    records: &mut Vec<T>,
    field: T::Field,
    previous: &State<T::Field>,
) -> State<T::Field> {
    let state = previous.next(field);
    let indices = permutation(records, field, state.order);
    let mut slots =
        mem::take(records).into_iter().map(Some).collect::<Vec<_>>();
    records.extend(indices.into_iter().filter_map(|i| slots[i].take()));
    state
}
