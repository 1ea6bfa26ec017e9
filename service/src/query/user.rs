//! `User`-related [`Query`] implementations.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Identity;
use crate::{
    domain::user::session,
    infra::{gateway, Gateway},
    read, Service,
};

use super::Query;

/// [`Query`] of the own [`read::user::Profile`] of the current `User`.
#[derive(Clone, Copy, Debug)]
pub struct Profile;

impl<St, Gw> Query<Profile> for Service<St, Gw>
where
    Gw: for<'t> Gateway<
        Select<By<read::user::Profile, &'t session::Token>>,
        Ok = read::user::Profile,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = read::user::Profile;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: Profile) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Some(identity) = self.current_identity() else {
            return Err(tracerr::new!(E::NotAuthenticated));
        };

        self.gateway()
            .execute(Select(By::new(&identity.token)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// [`Query`] listing all the registered `User`s as [`read::user::Record`]s.
///
/// The remote service decides who may list `User`s: a rejection is surfaced
/// as an [`ExecutionError`], never as an end of the current session.
#[derive(Clone, Copy, Debug)]
pub struct List;

impl<St, Gw> Query<List> for Service<St, Gw>
where
    Gw: for<'t> Gateway<
        Select<By<Vec<read::user::Record>, &'t session::Token>>,
        Ok = Vec<read::user::Record>,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = Vec<read::user::Record>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: List) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Some(identity) = self.current_identity() else {
            return Err(tracerr::new!(E::NotAuthenticated));
        };

        self.gateway()
            .execute(Select(By::new(&identity.token)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of a `User`-related [`Query`] execution.
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
