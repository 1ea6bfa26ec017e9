//! [`Command`] for deleting an existing `User`.

use common::operations::Delete;
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
    Service,
};

use super::Command;

/// [`Command`] deleting an existing `User` on the remote service, authorized
/// by the current session.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteUser(pub user::Id);

impl<St, Gw> Command<DeleteUser> for Service<St, Gw>
where
    Gw: for<'t> Gateway<
        Delete<Authorized<'t, user::Id>>,
        Ok = (),
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteUser(id): DeleteUser,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Some(identity) = self.current_identity() else {
            return Err(tracerr::new!(E::NotAuthenticated));
        };

        self.gateway()
            .execute(Delete(Authorized {
                token: &identity.token,
                payload: id,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteUser`] [`Command`] execution.
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

#[cfg(test)]
mod spec {
    use crate::{
        domain::user::Role,
        testing::{self, Memory, Remote},
        Command as _, Service,
    };

    use super::{DeleteUser, ExecutionError};

    #[tokio::test]
    async fn deletes_user_when_authenticated() {
        let service = Service::new(Memory::default(), Remote::default());
        service
            .replace_identity(Some(testing::identity(1, Role::Admin, "alice")));

        service.execute(DeleteUser(3.into())).await.unwrap();
    }

    #[tokio::test]
    async fn fails_when_logged_out() {
        let service = Service::new(Memory::default(), Remote::default());

        let err =
            service.execute(DeleteUser(3.into())).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotAuthenticated));
    }
}
