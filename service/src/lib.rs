//! Service contains the session and authorization logic of the client.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod access;
pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{Identity, Role};

pub use self::{command::Command, query::Query};

/// Client service owning the current [`Identity`].
///
/// Cloning is shallow: all clones share the same [`Identity`] slot, so there
/// is a single authoritative "current user" per process.
#[derive(Clone, Debug)]
pub struct Service<St, Gw> {
    /// [`Storage`] persisting the current session between restarts.
    ///
    /// [`Storage`]: infra::Storage
    storage: St,

    /// [`Gateway`] to the remote authentication and resource services.
    ///
    /// [`Gateway`]: infra::Gateway
    gateway: Gw,

    /// Currently authenticated [`Identity`], if any.
    identity: Arc<RwLock<Option<Identity>>>,
}

impl<St, Gw> Service<St, Gw> {
    /// Creates a new [`Service`] with the provided infrastructure.
    ///
    /// The created [`Service`] starts in the logged out state. Execute a
    /// [`command::RestoreSession`] to pick up a persisted session.
    pub fn new(storage: St, gateway: Gw) -> Self {
        Self {
            storage,
            gateway,
            identity: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns [`Storage`] of this [`Service`].
    ///
    /// [`Storage`]: infra::Storage
    #[must_use]
    pub fn storage(&self) -> &St {
        &self.storage
    }

    /// Returns [`Gateway`] of this [`Service`].
    ///
    /// [`Gateway`]: infra::Gateway
    #[must_use]
    pub fn gateway(&self) -> &Gw {
        &self.gateway
    }

    /// Returns the currently authenticated [`Identity`], if any.
    ///
    /// Pure in-memory read, never touches [`Storage`] or [`Gateway`].
    ///
    /// [`Gateway`]: infra::Gateway
    /// [`Storage`]: infra::Storage
    #[must_use]
    pub fn current_identity(&self) -> Option<Identity> {
        self.identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Checks whether the current [`Identity`] may access a view requiring
    /// the provided [`Role`]s.
    #[must_use]
    pub fn authorize(&self, required_roles: &[Role]) -> access::Decision {
        access::check(self.current_identity().as_ref(), required_roles)
    }

    /// Replaces the current [`Identity`] with the provided one.
    ///
    /// Callers must have already issued the matching [`Storage`] write or
    /// delete, so the persisted token never diverges from the in-memory
    /// [`Identity`].
    ///
    /// [`Storage`]: infra::Storage
    pub(crate) fn replace_identity(&self, identity: Option<Identity>) {
        *self.identity.write().unwrap_or_else(PoisonError::into_inner) =
            identity;
    }
}
