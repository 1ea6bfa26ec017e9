//! `User` read models, as returned by the remote service.

use serde::Deserialize;

use crate::domain::user;

/// Profile of the currently authenticated `User`.
#[derive(Clone, Debug, Deserialize)]
pub struct Profile {
    /// [`user::Username`] of the `User`.
    pub username: user::Username,

    /// [`user::Role`] of the `User`.
    pub role: user::Role,

    /// Email address of the `User`, if any.
    #[serde(default)]
    pub email: Option<String>,
}

/// Row of a `User`s listing.
#[derive(Clone, Debug, Deserialize)]
pub struct Record {
    /// ID of the `User`.
    pub id: user::Id,

    /// [`user::Username`] of the `User`.
    pub username: user::Username,

    /// [`user::Role`] of the `User`.
    pub role: user::Role,
}
