//! [`Context`]-related definitions.

use crate::Service;

/// Application context handed to the views.
///
/// Views receive everything they act upon through this [`Context`]: there is
/// no ambient session state besides the one the [`Service`] owns.
#[derive(Clone, Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,
}

impl Context {
    /// Creates a new [`Context`] over the provided [`Service`].
    #[must_use]
    pub fn new(service: Service) -> Self {
        Self { service }
    }

    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }
}
