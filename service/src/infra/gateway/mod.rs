//! [`Gateway`]-related implementations.
//!
//! A [`Gateway`] talks to the remote authentication and resource services:
//! it exchanges credentials for a session token and performs protected
//! resource operations on behalf of the current session.

pub mod http;

use derive_more::{Display, Error as StdError, From};
use secrecy::SecretBox;

use crate::domain::user;

pub use self::http::Http;

/// Remote service operation.
pub use common::Handler as Gateway;

/// `User` credentials to exchange for a session token.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// [`user::Username`] to authenticate as.
    pub username: user::Username,

    /// [`user::Password`] to authenticate with.
    pub password: SecretBox<user::Password>,
}

/// [`Gateway`] operation payload authorized by the session token of the
/// current `User`.
#[derive(Clone, Copy, Debug)]
pub struct Authorized<'t, T> {
    /// Token authorizing the operation.
    pub token: &'t crate::domain::user::session::Token,

    /// Payload of the operation.
    pub payload: T,
}

/// [`Gateway`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Http`] gateway error.
    Http(http::Error),
}

impl Error {
    /// Indicates whether this [`Error`] is a rejection of the presented
    /// credentials or session token, rather than a transport failure.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Http(e) => e.is_rejection(),
        }
    }
}
