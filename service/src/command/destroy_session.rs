//! [`Command`] for destroying the current `User` session.

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Identity;
use crate::{
    infra::{
        storage::{self, Slot},
        Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] destroying the current session: the persisted token is
/// removed and the in-memory [`Identity`] is cleared.
///
/// Idempotent: destroying an already absent session succeeds.
#[derive(Clone, Copy, Debug)]
pub struct DestroySession;

impl<St, Gw> Command<DestroySession> for Service<St, Gw>
where
    St: Storage<Delete<Slot>, Ok = (), Err = Traced<storage::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: DestroySession) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let deleted = self.storage().execute(Delete(Slot)).await;

        // Even if the persisted token couldn't be removed, the in-memory
        // session ends here: no view may keep acting on behalf of a `User`
        // who asked to leave.
        self.replace_identity(None);

        deleted.map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DestroySession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    ///
    /// [`Storage`]: crate::infra::Storage
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
