//! [`Command`] for creating a `User` session.

use common::operations::{Insert, Perform};
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Password, Username};
use crate::{
    domain::user::{
        self,
        session::{self, Identity, Session},
    },
    infra::{
        gateway::{self, Credentials},
        storage, Gateway, Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] for creating a `User` session, making its [`Identity`] the
/// current one.
///
/// The freshly obtained token is persisted to [`Storage`] before the
/// in-memory [`Identity`] is replaced, so the persisted session never lags
/// behind the live one.
#[derive(Debug, From)]
pub enum CreateSession {
    /// Exchange the provided `User` credentials for a fresh token.
    ByCredentials {
        /// [`Username`] of a `User`.
        username: user::Username,

        /// [`Password`] of a `User`.
        password: SecretBox<user::Password>,
    },

    /// Adopt an already issued [`session::Token`].
    ByToken(session::Token),
}

impl<St, Gw> Command<CreateSession> for Service<St, Gw>
where
    St: Storage<
        Insert<session::Token>,
        Ok = (),
        Err = Traced<storage::Error>,
    >,
    Gw: Gateway<
        Perform<Credentials>,
        Ok = session::Token,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = Identity;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateSession) -> Result<Self::Ok, Self::Err> {
        use CreateSession as Cmd;
        use ExecutionError as E;

        let token = match cmd {
            Cmd::ByCredentials { username, password } => self
                .gateway()
                .execute(Perform(Credentials { username, password }))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
            Cmd::ByToken(token) => token,
        };

        // An undecodable token never becomes the current session, and never
        // reaches `Storage` either.
        let session = Session::decode(&token)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.storage()
            .execute(Insert(token.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let identity = Identity::new(session, token);
        self.replace_identity(Some(identity.clone()));

        Ok(identity)
    }
}

/// Error of [`CreateSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    ///
    /// [`Gateway`]: crate::infra::Gateway
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// Obtained token doesn't decode into a [`Session`].
    #[display("{_0}")]
    InvalidToken(session::DecodeError),

    /// [`Storage`] error.
    ///
    /// [`Storage`]: crate::infra::Storage
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}

impl ExecutionError {
    /// Indicates whether this [`ExecutionError`] means the presented
    /// credentials were rejected, rather than some infrastructure failure.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::Gateway(e) => e.is_rejection(),
            Self::InvalidToken(_) | Self::Storage(_) => false,
        }
    }
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        domain::user::Role,
        testing::{self, BrokenStorage, Memory, Remote},
        Command as _, Service,
    };

    use super::CreateSession;

    fn credentials(username: &str, password: &str) -> CreateSession {
        CreateSession::ByCredentials {
            username: username.parse().unwrap(),
            password: SecretBox::new(Box::new(password.parse().unwrap())),
        }
    }

    #[tokio::test]
    async fn signs_in_with_correct_credentials() {
        let service = Service::new(Memory::default(), Remote::default());

        let identity = service
            .execute(credentials("alice", "correct"))
            .await
            .unwrap();

        assert_eq!(identity.id, 1.into());
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.username, "alice".parse().unwrap());
        assert_eq!(
            service.storage().persisted().map(|t| t.to_string()),
            Some(identity.token.to_string()),
        );
        assert!(matches!(
            service.authorize(&[Role::Admin, Role::Manager]),
            crate::access::Decision::Allow,
        ));
    }

    #[tokio::test]
    async fn rejects_wrong_credentials_without_side_effects() {
        let service = Service::new(Memory::default(), Remote::default());

        let err = service
            .execute(credentials("alice", "wrong"))
            .await
            .unwrap_err();

        assert!(err.as_ref().is_rejection());
        assert!(service.storage().persisted().is_none());
        assert!(service.current_identity().is_none());
    }

    #[tokio::test]
    async fn rejects_undecodable_token_without_side_effects() {
        let service = Service::new(Memory::default(), Remote::default());

        let result = service
            .execute(CreateSession::ByToken("garbage".parse().unwrap()))
            .await;

        assert!(result.is_err());
        assert!(service.storage().persisted().is_none());
        assert!(service.current_identity().is_none());
    }

    #[tokio::test]
    async fn adopts_provided_token() {
        let service = Service::new(Memory::default(), Remote::default());
        let token = testing::token(7, Role::Employee, "bob");

        let identity = service
            .execute(CreateSession::ByToken(token.clone()))
            .await
            .unwrap();

        assert_eq!(identity.role, Role::Employee);
        assert_eq!(
            service.storage().persisted().map(|t| t.to_string()),
            Some(token.to_string()),
        );
    }

    #[tokio::test]
    async fn keeps_logged_out_when_persisting_fails() {
        let service = Service::new(BrokenStorage, Remote::default());

        let result = service.execute(credentials("alice", "correct")).await;

        assert!(result.is_err());
        assert!(service.current_identity().is_none());
    }
}
