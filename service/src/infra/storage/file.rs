//! [`File`]-backed [`Storage`] implementation.

use std::{fs, io, path::PathBuf};

use common::operations::{Delete, Insert, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

use crate::{
    domain::user::session,
    infra::{storage, Storage},
};

use super::Slot;

/// [`File`]-backed [`Storage`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path of the file holding the persisted token.
    pub path: PathBuf,
}

/// [`Storage`] persisting the session token as a single file.
///
/// I/O is synchronous `std::fs`: the payload is a single short string, and
/// all session operations are serialized on one interaction flow anyway.
#[derive(Clone, Debug)]
pub struct File {
    /// Path of the file holding the persisted token.
    path: PathBuf,
}

impl File {
    /// Creates a new [`File`] [`Storage`] with the provided parameters.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.path.clone(),
        }
    }
}

impl Storage<Insert<session::Token>> for File {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Insert(token): Insert<session::Token>,
    ) -> Result<Self::Ok, Self::Err> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(Error::Io)
                .map_err(tracerr::from_and_wrap!(=> storage::Error))?;
        }
        fs::write(&self.path, AsRef::<str>::as_ref(&token))
            .map_err(Error::Io)
            .map_err(tracerr::from_and_wrap!(=> storage::Error))
    }
}

impl Storage<Select<Slot>> for File {
    type Ok = Option<session::Token>;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        _: Select<Slot>,
    ) -> Result<Self::Ok, Self::Err> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                // SAFETY: The slot only ever holds a previously issued
                //         token.
                #[expect(unsafe_code, reason = "invariants are preserved")]
                let token = unsafe { session::Token::new_unchecked(raw) };
                Ok(Some(token))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .map_err(Error::Io)
                .map_err(tracerr::from_and_wrap!(=> storage::Error)),
        }
    }
}

impl Storage<Delete<Slot>> for File {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        _: Delete<Slot>,
    ) -> Result<Self::Ok, Self::Err> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .map_err(Error::Io)
                .map_err(tracerr::from_and_wrap!(=> storage::Error)),
        }
    }
}

/// [`File`] [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Filesystem I/O failure.
    #[display("Filesystem operation failed: {_0}")]
    Io(io::Error),
}

#[cfg(test)]
mod spec {
    use common::operations::{Delete, Insert, Select};

    use crate::{domain::user::session, infra::Storage as _};

    use super::{Config, File, Slot};

    fn storage(dir: &tempfile::TempDir) -> File {
        File::new(&Config {
            path: dir.path().join("access_token"),
        })
    }

    #[tokio::test]
    async fn round_trips_any_token() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);

        for raw in ["sometoken", "a.b.c", "not a token at all \u{1f512}"] {
            let token = raw.parse::<session::Token>().unwrap();

            storage.execute(Insert(token)).await.unwrap();
            let loaded = storage.execute(Select(Slot)).await.unwrap();

            assert_eq!(loaded.unwrap().to_string(), raw);
        }
    }

    #[tokio::test]
    async fn loads_nothing_when_never_saved() {
        let dir = tempfile::tempdir().unwrap();

        let loaded = storage(&dir).execute(Select(Slot)).await.unwrap();

        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn deletes_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);

        let token = "sometoken".parse::<session::Token>().unwrap();
        storage.execute(Insert(token)).await.unwrap();

        storage.execute(Delete(Slot)).await.unwrap();
        assert!(storage.execute(Select(Slot)).await.unwrap().is_none());

        storage.execute(Delete(Slot)).await.unwrap();
        assert!(storage.execute(Select(Slot)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn overwrites_previous_token() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);

        storage
            .execute(Insert("first".parse::<session::Token>().unwrap()))
            .await
            .unwrap();
        storage
            .execute(Insert("second".parse::<session::Token>().unwrap()))
            .await
            .unwrap();

        let loaded = storage.execute(Select(Slot)).await.unwrap();

        assert_eq!(loaded.unwrap().to_string(), "second");
    }
}
