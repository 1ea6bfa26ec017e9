//! [`Command`] for registering a new `User`.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Identity;
use crate::{
    domain::user,
    infra::{
        gateway::{self, Authorized},
        Gateway,
    },
    read, Service,
};

use super::Command;

/// [`Command`] registering a new `User` on the remote service, authorized by
/// the current session.
///
/// Server-side role enforcement is authoritative: the remote service rejects
/// callers lacking the administrative role regardless of what the client
/// shows.
#[derive(Clone, Debug, From)]
pub struct CreateUser(pub user::NewUser);

impl<St, Gw> Command<CreateUser> for Service<St, Gw>
where
    Gw: for<'t> Gateway<
        Insert<Authorized<'t, user::NewUser>>,
        Ok = read::user::Record,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = read::user::Record;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        CreateUser(new_user): CreateUser,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Some(identity) = self.current_identity() else {
            return Err(tracerr::new!(E::NotAuthenticated));
        };

        self.gateway()
            .execute(Insert(Authorized {
                token: &identity.token,
                payload: new_user,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Gateway`] error.
    ///
    /// [`Gateway`]: crate::infra::Gateway
    #[display("`Gateway` operation failed: {_0}")]
    Gateway(gateway::Error),

    /// No [`Identity`] to authorize the operation with.
    #[display("No current `User` session")]
    NotAuthenticated,
}
