//! [`Command`] for restoring a persisted `User` session.

use common::operations::{Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::user::session::{self, Identity, Session},
    infra::{
        storage::{self, Slot},
        Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] restoring the [`Identity`] from the [`session::Token`]
/// persisted in [`Storage`], if any.
///
/// Intended to run once on startup, before any view is opened. It never
/// touches the network: the restored [`Identity`] is trusted until a remote
/// service rejects its token.
///
/// A failure to read [`Storage`] is not fatal: it's logged and the client
/// proceeds logged out. A persisted token that doesn't decode is discarded,
/// so the next startup doesn't trip over it again.
#[derive(Clone, Copy, Debug)]
pub struct RestoreSession;

impl<St, Gw> Command<RestoreSession> for Service<St, Gw>
where
    St: Storage<
            Select<Slot>,
            Ok = Option<session::Token>,
            Err = Traced<storage::Error>,
        > + Storage<Delete<Slot>, Ok = (), Err = Traced<storage::Error>>,
{
    type Ok = Option<Identity>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: RestoreSession) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let token = match self.storage().execute(Select(Slot)).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(
                    "Failed to load the persisted session token: {e}",
                );
                self.replace_identity(None);
                return Ok(None);
            }
        };
        let Some(token) = token else {
            self.replace_identity(None);
            return Ok(None);
        };

        match Session::decode(&token) {
            Ok(session) => {
                let identity = Identity::new(session, token);
                self.replace_identity(Some(identity.clone()));
                Ok(Some(identity))
            }
            Err(e) => {
                tracing::warn!("Discarding undecodable persisted token: {e}");
                self.storage()
                    .execute(Delete(Slot))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                self.replace_identity(None);
                Ok(None)
            }
        }
    }
}

/// Error of [`RestoreSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    ///
    /// [`Storage`]: crate::infra::Storage
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
