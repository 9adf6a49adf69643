//! File [`Storage`] implementation.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use common::operations::{Delete, Insert, Select};
use derive_more::{Display, Error as StdError, From};
use tempfile::NamedTempFile;
use tracerr::Traced;
use tracing as log;

use super::{Entries, Key, Storage};

/// Contents of a [`File`].
type Map = BTreeMap<String, String>;

/// [`Storage`] persisting values into a single JSON file.
///
/// The file is always replaced as a whole: new contents are written into a
/// temporary file next to it, which is then renamed over the old one. So a
/// reader sees either all the values of a write, or none of them. On Unix the
/// file is only accessible by its owner.
#[derive(Clone, Debug)]
pub struct File {
    /// Path to the file.
    path: PathBuf,
}

impl File {
    /// Creates a new [`File`] storage at the provided `path`.
    ///
    /// Nothing is touched until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the contents of this [`File`].
    ///
    /// A missing file has no contents.
    fn load(&self) -> Result<Map, Traced<Error>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Map::new());
            }
            Err(e) => return Err(tracerr::new!(Error::Io(e))),
        };
        serde_json::from_slice(&raw).map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Replaces the contents of this [`File`] atomically.
    ///
    /// Empty contents remove the file.
    fn store(&self, map: &Map) -> Result<(), Traced<Error>> {
        if map.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => {
                    Err(tracerr::new!(Error::Io(e)))
                }
                Ok(()) | Err(_) => Ok(()),
            };
        }

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(tracerr::from_and_wrap!(=> Error))?;

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        serde_json::to_writer_pretty(&mut tmp, map)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        tmp.as_file()
            .sync_all()
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        tmp.persist(&self.path)
            .map(drop)
            .map_err(|e| tracerr::new!(Error::Io(e.error)))
    }

    /// Applies the provided `change` to the contents of this [`File`].
    ///
    /// Malformed contents are discarded.
    fn update(
        &self,
        change: impl FnOnce(&mut Map),
    ) -> Result<(), Traced<Error>> {
        let mut map = match self.load() {
            Ok(map) => map,
            Err(e) => {
                if !matches!(AsRef::<Error>::as_ref(&e), Error::Json(_)) {
                    return Err(e);
                }
                log::warn!(
                    "discarding malformed `{}` storage: {e}",
                    self.path.display(),
                );
                Map::new()
            }
        };
        change(&mut map);
        self.store(&map)
    }
}

impl Storage<Select<Key>> for File {
    type Ok = Option<String>;
    type Err = Traced<super::Error>;

    fn execute(&self, Select(key): Select<Key>) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .load()
            .map_err(tracerr::map_from)?
            .remove(key.as_ref()))
    }
}

impl Storage<Insert<Entries>> for File {
    type Ok = ();
    type Err = Traced<super::Error>;

    fn execute(
        &self,
        Insert(entries): Insert<Entries>,
    ) -> Result<Self::Ok, Self::Err> {
        self.update(|map| {
            map.extend(
                entries.into_iter().map(|(k, v)| (k.as_ref().to_owned(), v)),
            );
        })
        .map_err(tracerr::map_from)
    }
}

impl Storage<Delete<Vec<Key>>> for File {
    type Ok = ();
    type Err = Traced<super::Error>;

    fn execute(
        &self,
        Delete(keys): Delete<Vec<Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.update(|map| {
            for key in keys {
                drop(map.remove(key.as_ref()));
            }
        })
        .map_err(tracerr::map_from)
    }
}

/// [`File`] storage error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O error.
    #[display("I/O failed: {_0}")]
    Io(io::Error),

    /// Malformed contents.
    #[display("Malformed JSON: {_0}")]
    Json(serde_json::Error),
}

#[cfg(test)]
mod spec {
    use std::fs;

    use common::operations::{Delete, Insert, Select};

    use crate::infra::Storage as _;

    use super::{File, Key};

    #[test]
    fn persists_values_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let storage = File::new(&path);
        assert_eq!(storage.execute(Select(Key::Token)).unwrap(), None);
        storage
            .execute(Insert(vec![
                (Key::Token, "a.b.c".to_owned()),
                (Key::User, r#"{"id":1}"#.to_owned()),
            ]))
            .unwrap();

        let reopened = File::new(&path);
        assert_eq!(
            reopened.execute(Select(Key::Token)).unwrap().as_deref(),
            Some("a.b.c"),
        );
        assert_eq!(
            reopened.execute(Select(Key::User)).unwrap().as_deref(),
            Some(r#"{"id":1}"#),
        );

        reopened.execute(Delete(vec![Key::Token, Key::User])).unwrap();
        assert!(!path.exists());
        assert_eq!(storage.execute(Select(Key::User)).unwrap(), None);

        reopened.execute(Delete(vec![Key::Token])).unwrap();
    }

    #[test]
    fn keeps_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = File::new(dir.path().join("session.json"));

        for i in 0..3 {
            storage
                .execute(Insert(vec![(Key::Token, i.to_string())]))
                .unwrap();
        }

        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 1);
    }

    #[test]
    fn recovers_from_malformed_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let storage = File::new(&path);

        assert!(storage.execute(Select(Key::Token)).is_err());

        storage.execute(Delete(vec![Key::Token])).unwrap();
        assert_eq!(storage.execute(Select(Key::Token)).unwrap(), None);

        fs::write(&path, "[1, 2]").unwrap();
        storage
            .execute(Insert(vec![(Key::Token, "t".to_owned())]))
            .unwrap();
        assert_eq!(
            storage.execute(Select(Key::Token)).unwrap().as_deref(),
            Some("t"),
        );
    }

    #[cfg(unix)]
    #[test]
    fn is_private_to_owner() {
        use std::os::unix::fs::PermissionsExt as _;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        File::new(&path)
            .execute(Insert(vec![(Key::Token, "t".to_owned())]))
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
