//! [`Http`]-backed [`Gateway`] implementation.

use std::time::Duration;

use common::operations::{By, Delete, Insert, Perform, Select, Update};
use derive_more::{Display, Error as StdError, From};
use secrecy::ExposeSecret as _;
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::{
    domain::user::{self, session},
    infra::{
        gateway::{self, Authorized, Credentials},
        Gateway,
    },
    read,
};

/// [`Http`] [`Gateway`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the remote API.
    pub base_url: String,

    /// Timeout applied to every request.
    ///
    /// An expired timeout during the credentials exchange is a login
    /// failure like any other.
    pub timeout: Duration,
}

/// [`Gateway`] talking to the remote services over HTTP.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base URL of the remote API, without a trailing slash.
    base_url: String,
}

impl Http {
    /// Creates a new [`Http`] [`Gateway`] with the provided parameters.
    ///
    /// # Errors
    ///
    /// Errors if the underlying HTTP client cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, Traced<gateway::Error>> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Transport)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Checks the status of the provided `response`, mapping authentication
    /// rejections and unexpected statuses to their [`Error`]s.
    fn acknowledged(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, Error> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            Err(Error::Unauthorized(status))
        } else if !status.is_success() {
            Err(Error::UnexpectedStatus(status))
        } else {
            Ok(response)
        }
    }
}

/// Body of a successful credentials exchange.
#[derive(Debug, Deserialize)]
struct SignedIn {
    /// Issued session token.
    access: String,
}

impl Gateway<Perform<Credentials>> for Http {
    type Ok = session::Token;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Perform(credentials): Perform<Credentials>,
    ) -> Result<Self::Ok, Self::Err> {
        /// Body of the credentials exchange request.
        #[derive(Serialize)]
        struct SignIn<'c> {
            /// Username to authenticate as.
            username: &'c user::Username,

            /// Password to authenticate with.
            password: &'c str,
        }

        let Credentials { username, password } = credentials;

        let response = self
            .client
            .post(format!("{}/login/", self.base_url))
            .json(&SignIn {
                username: &username,
                password: password.expose_secret().as_ref(),
            })
            .send()
            .await
            .map_err(Error::Transport)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;

        // Any non-2xx outcome and any malformed body are reported
        // uniformly, so the caller cannot distinguish an unknown `User`
        // from a wrong password.
        if !response.status().is_success() {
            return Err(tracerr::new!(gateway::Error::from(
                Error::CredentialsRejected,
            )));
        }
        let SignedIn { access } =
            response.json().await.map_err(|_| {
                tracerr::new!(gateway::Error::from(Error::CredentialsRejected))
            })?;

        // SAFETY: The issuing service only ever responds with a valid
        //         token in the `access` field.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        Ok(unsafe { session::Token::new_unchecked(access) })
    }
}

impl<'t> Gateway<Select<By<read::user::Profile, &'t session::Token>>>
    for Http
{
    type Ok = read::user::Profile;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::user::Profile, &'t session::Token>>,
    ) -> Result<Self::Ok, Self::Err> {
        let response = self
            .client
            .get(format!("{}/profile/", self.base_url))
            .bearer_auth(by.into_inner())
            .send()
            .await
            .map_err(Error::Transport)
            .and_then(Self::acknowledged)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;

        response
            .json()
            .await
            .map_err(Error::Transport)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))
    }
}

impl<'t> Gateway<Select<By<Vec<read::user::Record>, &'t session::Token>>>
    for Http
{
    type Ok = Vec<read::user::Record>;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<read::user::Record>, &'t session::Token>>,
    ) -> Result<Self::Ok, Self::Err> {
        let response = self
            .client
            .get(format!("{}/users/", self.base_url))
            .bearer_auth(by.into_inner())
            .send()
            .await
            .map_err(Error::Transport)
            .and_then(Self::acknowledged)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;

        response
            .json()
            .await
            .map_err(Error::Transport)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))
    }
}

impl<'t> Gateway<Insert<Authorized<'t, user::NewUser>>> for Http {
    type Ok = read::user::Record;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Insert(op): Insert<Authorized<'t, user::NewUser>>,
    ) -> Result<Self::Ok, Self::Err> {
        /// Body of the `User` registration request.
        #[derive(Serialize)]
        struct Register<'u> {
            /// Username of the new `User`.
            username: &'u user::Username,

            /// Password of the new `User`.
            password: &'u str,

            /// Role of the new `User`.
            role: user::Role,
        }

        let Authorized { token, payload } = op;

        let response = self
            .client
            .post(format!("{}/users/create/", self.base_url))
            .bearer_auth(token)
            .json(&Register {
                username: &payload.username,
                password: payload.password.expose_secret().as_ref(),
                role: payload.role,
            })
            .send()
            .await
            .map_err(Error::Transport)
            .and_then(Self::acknowledged)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))?;

        response
            .json()
            .await
            .map_err(Error::Transport)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))
    }
}

impl<'t> Gateway<Update<Authorized<'t, user::UserPatch>>> for Http {
    type Ok = ();
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Update(op): Update<Authorized<'t, user::UserPatch>>,
    ) -> Result<Self::Ok, Self::Err> {
        /// Body of the `User` update request.
        #[derive(Serialize)]
        struct Patch<'u> {
            /// New username of the `User`.
            username: &'u user::Username,

            /// New role of the `User`.
            role: user::Role,
        }

        let Authorized { token, payload } = op;

        self.client
            .put(format!("{}/users/{}/", self.base_url, payload.id))
            .bearer_auth(token)
            .json(&Patch {
                username: &payload.username,
                role: payload.role,
            })
            .send()
            .await
            .map_err(Error::Transport)
            .and_then(Self::acknowledged)
            .map(drop)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))
    }
}

impl<'t> Gateway<Delete<Authorized<'t, user::Id>>> for Http {
    type Ok = ();
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Delete(op): Delete<Authorized<'t, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Authorized { token, payload: id } = op;

        self.client
            .delete(format!("{}/users/{id}/delete/", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(Error::Transport)
            .and_then(Self::acknowledged)
            .map(drop)
            .map_err(tracerr::from_and_wrap!(=> gateway::Error))
    }
}

/// [`Http`] [`Gateway`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Presented credentials were rejected, or the exchange response was
    /// not understood.
    #[display("Credentials rejected by the authentication service")]
    #[from(ignore)]
    CredentialsRejected,

    /// Remote service rejected the presented session token.
    #[display("Remote service rejected the session token: {_0}")]
    #[from(ignore)]
    Unauthorized(#[error(not(source))] reqwest::StatusCode),

    /// Remote service responded with an unexpected status.
    #[display("Unexpected response status: {_0}")]
    #[from(ignore)]
    UnexpectedStatus(#[error(not(source))] reqwest::StatusCode),

    /// Underlying HTTP transport failure, timeouts included.
    #[display("HTTP request failed: {_0}")]
    Transport(reqwest::Error),
}

impl Error {
    /// Indicates whether this [`Error`] is a rejection of the presented
    /// credentials or session token.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::CredentialsRejected | Self::Unauthorized(_) => true,
            Self::UnexpectedStatus(_) | Self::Transport(_) => false,
        }
    }
}
