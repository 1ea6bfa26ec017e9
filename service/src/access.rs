//! Access control of protected views.
//!
//! Gates rendering and navigation only: every protected operation is
//! re-checked by the remote service, which remains the actual security
//! boundary.

use crate::domain::{Identity, Role};

/// Checks whether the provided [`Identity`] satisfies the `required_roles`
/// of a protected view.
///
/// An absent [`Identity`] is never authorized. An empty `required_roles`
/// admits any authenticated [`Identity`].
#[must_use]
pub fn is_authorized(
    identity: Option<&Identity>,
    required_roles: &[Role],
) -> bool {
    identity.is_some_and(|identity| {
        required_roles.is_empty() || required_roles.contains(&identity.role)
    })
}

/// Decision of the access guard for a protected view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// The view may be rendered.
    Allow,

    /// The view may not be rendered, and navigation falls back to the login
    /// entry point.
    ///
    /// An authenticated `User` lacking the required [`Role`] lands here too,
    /// not on a separate "forbidden" page.
    RedirectToLogin,
}

/// Decides whether a view requiring the provided [`Role`]s may be rendered
/// for the provided [`Identity`].
#[must_use]
pub fn check(identity: Option<&Identity>, required_roles: &[Role]) -> Decision {
    if is_authorized(identity, required_roles) {
        Decision::Allow
    } else {
        Decision::RedirectToLogin
    }
}

#[cfg(test)]
mod spec {
    use crate::{domain::Role, testing};

    use super::{check, is_authorized, Decision};

    #[test]
    fn denies_absent_identity() {
        assert!(!is_authorized(None, &[]));
        assert!(!is_authorized(None, &[Role::Admin]));
        assert!(!is_authorized(
            None,
            &[Role::Admin, Role::Manager, Role::Employee],
        ));
    }

    #[test]
    fn admits_any_identity_without_requirements() {
        for role in [Role::Admin, Role::Manager, Role::Employee] {
            let identity = testing::identity(1, role, "alice");

            assert!(is_authorized(Some(&identity), &[]));
        }
    }

    #[test]
    fn requires_role_membership() {
        let identity = testing::identity(1, Role::Employee, "bob");

        assert!(is_authorized(Some(&identity), &[Role::Employee]));
        assert!(is_authorized(
            Some(&identity),
            &[Role::Manager, Role::Employee],
        ));
        assert!(!is_authorized(
            Some(&identity),
            &[Role::Admin, Role::Manager],
        ));
    }

    #[test]
    fn redirects_to_login_when_denied() {
        let identity = testing::identity(1, Role::Employee, "bob");

        assert_eq!(
            check(Some(&identity), &[Role::Admin, Role::Manager]),
            Decision::RedirectToLogin,
        );
        assert_eq!(check(None, &[]), Decision::RedirectToLogin);
        assert_eq!(check(Some(&identity), &[]), Decision::Allow);
    }
}
