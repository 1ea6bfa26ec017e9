//! [`Command`] definition.

pub mod create_session;
pub mod create_user;
pub mod delete_user;
pub mod destroy_session;
pub mod restore_session;
pub mod update_user;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_session::CreateSession, create_user::CreateUser,
    delete_user::DeleteUser, destroy_session::DestroySession,
    restore_session::RestoreSession, update_user::UpdateUser,
};
