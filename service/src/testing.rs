//! Helpers and fakes shared by unit tests.

use std::{io, sync::Mutex, time::Duration};

use common::{
    operations::{By, Delete, Insert, Perform, Select, Update},
    DateTime,
};
use secrecy::ExposeSecret as _;
use tracerr::Traced;

use crate::{
    domain::user::{
        self,
        session::{self, Identity, Session},
        Role,
    },
    infra::{
        gateway::{self, Authorized, Credentials},
        storage::{self, Slot},
        Gateway, Storage,
    },
    read,
};

/// Secret the issued test tokens are signed with.
pub(crate) const JWT_SECRET: &[u8] = b"s3cr3t";

/// Encodes a signed token carrying the provided [`Session`] claims, expiring
/// half an hour from now.
pub(crate) fn token(id: i64, role: Role, username: &str) -> session::Token {
    let raw = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &Session {
            user_id: id.into(),
            role,
            username: username.parse().unwrap(),
            expires_at: (DateTime::now() + Duration::from_secs(30 * 60))
                .coerce(),
        },
        &jsonwebtoken::EncodingKey::from_secret(JWT_SECRET),
    )
    .unwrap();
    raw.parse().unwrap()
}

/// Builds an [`Identity`] backed by a [`token()`] with the same claims.
pub(crate) fn identity(id: i64, role: Role, username: &str) -> Identity {
    let token = token(id, role, username);
    Identity::new(Session::decode(&token).unwrap(), token)
}

/// In-memory single-slot [`Storage`].
#[derive(Debug, Default)]
pub(crate) struct Memory(Mutex<Option<session::Token>>);

impl Memory {
    /// Returns the currently persisted token, if any.
    pub(crate) fn persisted(&self) -> Option<session::Token> {
        self.0.lock().unwrap().clone()
    }
}

impl Storage<Insert<session::Token>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Insert(token): Insert<session::Token>,
    ) -> Result<Self::Ok, Self::Err> {
        *self.0.lock().unwrap() = Some(token);
        Ok(())
    }
}

impl Storage<Select<Slot>> for Memory {
    type Ok = Option<session::Token>;
    type Err = Traced<storage::Error>;

    async fn execute(&self, _: Select<Slot>) -> Result<Self::Ok, Self::Err> {
        Ok(self.persisted())
    }
}

impl Storage<Delete<Slot>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(&self, _: Delete<Slot>) -> Result<Self::Ok, Self::Err> {
        *self.0.lock().unwrap() = None;
        Ok(())
    }
}

/// [`Storage`] failing every operation with an I/O error.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrokenStorage;

/// Builds the [`Traced`] [`storage::Error`] every [`BrokenStorage`]
/// operation fails with.
fn storage_failure() -> Traced<storage::Error> {
    tracerr::new!(storage::Error::from(storage::file::Error::from(
        io::Error::from(io::ErrorKind::PermissionDenied),
    )))
}

impl Storage<Insert<session::Token>> for BrokenStorage {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        _: Insert<session::Token>,
    ) -> Result<Self::Ok, Self::Err> {
        Err(storage_failure())
    }
}

impl Storage<Select<Slot>> for BrokenStorage {
    type Ok = Option<session::Token>;
    type Err = Traced<storage::Error>;

    async fn execute(&self, _: Select<Slot>) -> Result<Self::Ok, Self::Err> {
        Err(storage_failure())
    }
}

impl Storage<Delete<Slot>> for BrokenStorage {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(&self, _: Delete<Slot>) -> Result<Self::Ok, Self::Err> {
        Err(storage_failure())
    }
}

/// Canned remote services: issues a token for the `alice`/`correct`
/// credentials pair, and serves resource operations unless told to
/// [`reject`](Remote::reject) them.
#[derive(Debug, Default)]
pub(crate) struct Remote {
    /// Whether authorized resource operations are rejected with a `403`.
    pub(crate) reject: bool,
}

/// Builds the [`Traced`] [`gateway::Error`] of a rejected resource
/// operation.
fn rejection() -> Traced<gateway::Error> {
    tracerr::new!(gateway::Error::from(gateway::http::Error::Unauthorized(
        reqwest::StatusCode::FORBIDDEN,
    )))
}

impl Gateway<Perform<Credentials>> for Remote {
    type Ok = session::Token;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Perform(credentials): Perform<Credentials>,
    ) -> Result<Self::Ok, Self::Err> {
        let Credentials { username, password } = credentials;
        if username == "alice".parse().unwrap()
            && AsRef::<str>::as_ref(password.expose_secret()) == "correct"
        {
            Ok(token(1, Role::Admin, "alice"))
        } else {
            Err(tracerr::new!(gateway::Error::from(
                gateway::http::Error::CredentialsRejected,
            )))
        }
    }
}

impl<'t> Gateway<Select<By<read::user::Profile, &'t session::Token>>>
    for Remote
{
    type Ok = read::user::Profile;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        _: Select<By<read::user::Profile, &'t session::Token>>,
    ) -> Result<Self::Ok, Self::Err> {
        if self.reject {
            return Err(rejection());
        }
        Ok(read::user::Profile {
            username: "alice".parse().unwrap(),
            role: Role::Admin,
            email: None,
        })
    }
}

impl<'t> Gateway<Select<By<Vec<read::user::Record>, &'t session::Token>>>
    for Remote
{
    type Ok = Vec<read::user::Record>;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<read::user::Record>, &'t session::Token>>,
    ) -> Result<Self::Ok, Self::Err> {
        if self.reject {
            return Err(rejection());
        }
        Ok(vec![read::user::Record {
            id: 1.into(),
            username: "alice".parse().unwrap(),
            role: Role::Admin,
        }])
    }
}

impl<'t> Gateway<Insert<Authorized<'t, user::NewUser>>> for Remote {
    type Ok = read::user::Record;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Insert(op): Insert<Authorized<'t, user::NewUser>>,
    ) -> Result<Self::Ok, Self::Err> {
        if self.reject {
            return Err(rejection());
        }
        Ok(read::user::Record {
            id: 2.into(),
            username: op.payload.username,
            role: op.payload.role,
        })
    }
}

impl<'t> Gateway<Update<Authorized<'t, user::UserPatch>>> for Remote {
    type Ok = ();
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        _: Update<Authorized<'t, user::UserPatch>>,
    ) -> Result<Self::Ok, Self::Err> {
        if self.reject {
            return Err(rejection());
        }
        Ok(())
    }
}

impl<'t> Gateway<Delete<Authorized<'t, user::Id>>> for Remote {
    type Ok = ();
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        _: Delete<Authorized<'t, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        if self.reject {
            return Err(rejection());
        }
        Ok(())
    }
}
