//! [`Args`] definitions.

use clap::Parser;
use service::domain::user;

/// Client of the ERP system.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// View to open.
    ///
    /// Defaults to the dashboard when omitted.
    #[command(subcommand)]
    pub route: Option<Route>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// View requested on the command line.
///
/// Anything not matching a known route falls back to the login view.
#[derive(Clone, Debug, clap::Subcommand)]
pub enum Route {
    /// Sign in with `User` credentials.
    Login,

    /// Open the dashboard of the current `User`.
    Dashboard,

    /// Sign the current `User` out.
    Logout,

    /// Register a new `User` (administrators only).
    CreateUser {
        /// Username of the new `User`.
        username: user::Username,

        /// Role of the new `User` (`ADMIN`, `MANAGER` or `EMPLOYEE`).
        role: user::Role,
    },

    /// Update an existing `User` (administrators only).
    UpdateUser {
        /// ID of the `User` to update.
        id: user::Id,

        /// New username of the `User`.
        username: user::Username,

        /// New role of the `User` (`ADMIN`, `MANAGER` or `EMPLOYEE`).
        role: user::Role,
    },

    /// Delete an existing `User` (administrators only).
    DeleteUser {
        /// ID of the `User` to delete.
        id: user::Id,
    },

    /// Unknown route.
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}
