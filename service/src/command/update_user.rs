//! [`Command`] for updating an existing `User`.

use common::operations::Update;
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

/// [`Command`] updating an existing `User` on the remote service, authorized
/// by the current session.
#[derive(Clone, Debug, From)]
pub struct UpdateUser(pub user::UserPatch);

impl<St, Gw> Command<UpdateUser> for Service<St, Gw>
where
    Gw: for<'t> Gateway<
        Update<Authorized<'t, user::UserPatch>>,
        Ok = (),
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        UpdateUser(patch): UpdateUser,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Some(identity) = self.current_identity() else {
            return Err(tracerr::new!(E::NotAuthenticated));
        };

        self.gateway()
            .execute(Update(Authorized {
                token: &identity.token,
                payload: patch,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UpdateUser`] [`Command`] execution.
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
        domain::user::{Role, UserPatch},
        testing::{self, Memory, Remote},
        Command as _, Service,
    };

    use super::{ExecutionError, UpdateUser};

    fn patch() -> UserPatch {
        UserPatch {
            id: 3.into(),
            username: "carol".parse().unwrap(),
            role: Role::Manager,
        }
    }

    #[tokio::test]
    async fn updates_user_when_authenticated() {
        let service = Service::new(Memory::default(), Remote::default());
        service
            .replace_identity(Some(testing::identity(1, Role::Admin, "alice")));

        service.execute(UpdateUser(patch())).await.unwrap();
    }

    #[tokio::test]
    async fn fails_when_logged_out() {
        let service = Service::new(Memory::default(), Remote::default());

        let err =
            service.execute(UpdateUser(patch())).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NotAuthenticated));
    }
}
