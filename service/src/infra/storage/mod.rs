//! [`Storage`]-related implementations.

pub mod file;
pub mod memory;

use common::operations::{Delete, Insert, Select};
use derive_more::{Display, Error as StdError, From};
use strum::{AsRefStr, EnumString};
use tracerr::Traced;

pub use self::{file::File, memory::Memory};

/// Durable key-value storage operation.
pub use common::BlockingHandler as Storage;

/// Key of a value kept in a [`Storage`].
#[derive(AsRefStr, Clone, Copy, Debug, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum Key {
    /// Raw session token.
    Token,

    /// JSON-serialized user of the session.
    User,
}

/// Values to write into a [`Storage`] at once.
pub type Entries = Vec<(Key, String)>;

/// [`Storage`] supporting all the operations a session needs.
pub trait KeyValue:
    Storage<Select<Key>, Ok = Option<String>, Err = Traced<Error>>
    + Storage<Insert<Entries>, Ok = (), Err = Traced<Error>>
    + Storage<Delete<Vec<Key>>, Ok = (), Err = Traced<Error>>
{
}

impl<T> KeyValue for T where
    T: Storage<Select<Key>, Ok = Option<String>, Err = Traced<Error>>
        + Storage<Insert<Entries>, Ok = (), Err = Traced<Error>>
        + Storage<Delete<Vec<Key>>, Ok = (), Err = Traced<Error>>
{
}

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`File`] error.
    #[display("`File` storage error: {_0}")]
    File(file::Error),
}
