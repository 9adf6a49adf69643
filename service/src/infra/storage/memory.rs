//! In-memory [`Storage`] implementation.

use std::{cell::RefCell, collections::HashMap};

use common::operations::{Delete, Insert, Select};
use tracerr::Traced;

use super::{Entries, Error, Key, Storage};

/// [`Storage`] keeping values in memory only.
///
/// Values are lost once it's dropped.
#[derive(Clone, Debug, Default)]
pub struct Memory(RefCell<HashMap<Key, String>>);

impl Memory {
    /// Returns a copy of the value stored under the provided [`Key`].
    #[must_use]
    pub fn get(&self, key: Key) -> Option<String> {
        self.0.borrow().get(&key).cloned()
    }

    /// Indicates whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl FromIterator<(Key, String)> for Memory {
    fn from_iter<I: IntoIterator<Item = (Key, String)>>(iter: I) -> Self {
        Self(RefCell::new(iter.into_iter().collect()))
    }
}

impl Storage<Select<Key>> for Memory {
    type Ok = Option<String>;
    type Err = Traced<Error>;

    fn execute(&self, Select(key): Select<Key>) -> Result<Self::Ok, Self::Err> {
        Ok(self.get(key))
    }
}

impl Storage<Insert<Entries>> for Memory {
    type Ok = ();
    type Err = Traced<Error>;

    fn execute(
        &self,
        Insert(entries): Insert<Entries>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.borrow_mut().extend(entries);
        Ok(())
    }
}

impl Storage<Delete<Vec<Key>>> for Memory {
    type Ok = ();
    type Err = Traced<Error>;

    fn execute(
        &self,
        Delete(keys): Delete<Vec<Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut map = self.0.borrow_mut();
        for key in keys {
            drop(map.remove(&key));
        }
        Ok(())
    }
}
