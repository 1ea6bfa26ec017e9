//! Views of the application.
//!
//! Every protected view is opened through the authorization check of the
//! [`Service`]: a denial never panics and never ends the session, it just
//! lands the `User` on the login view.
//!
//! [`Service`]: crate::Service

pub mod dashboard;
pub mod login;

use std::io::{self, Write as _};

use service::{access::Decision, command::DestroySession, Command as _};

use crate::{args::Route, Context};

/// Opens the view the provided [`Route`] points at.
///
/// # Errors
///
/// Errors if the terminal cannot be read from or written to. Remote and
/// [`Storage`] failures are rendered inline instead.
///
/// [`Storage`]: service::infra::Storage
pub async fn open(ctx: &Context, route: Option<Route>) -> Result<(), ()> {
    match route.unwrap_or(Route::Dashboard) {
        Route::Login => login::open(ctx).await,
        Route::Dashboard => {
            match ctx.service().authorize(dashboard::REQUIRED_ROLES) {
                Decision::Allow => dashboard::render(ctx).await,
                Decision::RedirectToLogin => login::open(ctx).await,
            }
        }
        Route::Logout => logout(ctx).await,
        Route::CreateUser { username, role } => {
            match ctx.service().authorize(dashboard::MANAGEMENT_ROLES) {
                Decision::Allow => {
                    dashboard::create_user(ctx, username, role).await
                }
                Decision::RedirectToLogin => login::open(ctx).await,
            }
        }
        Route::UpdateUser { id, username, role } => {
            match ctx.service().authorize(dashboard::MANAGEMENT_ROLES) {
                Decision::Allow => {
                    dashboard::update_user(ctx, id, username, role).await
                }
                Decision::RedirectToLogin => login::open(ctx).await,
            }
        }
        Route::DeleteUser { id } => {
            match ctx.service().authorize(dashboard::MANAGEMENT_ROLES) {
                Decision::Allow => dashboard::delete_user(ctx, id).await,
                Decision::RedirectToLogin => login::open(ctx).await,
            }
        }
        Route::Unknown(args) => {
            tracing::debug!("unknown route: {args:?}");
            login::open(ctx).await
        }
    }
}

/// Signs the current `User` out.
///
/// The in-memory session always ends, even if the persisted token cannot be
/// removed.
async fn logout(ctx: &Context) -> Result<(), ()> {
    if let Err(e) = ctx.service().execute(DestroySession).await {
        tracing::warn!("failed to remove the persisted session: {e}");
    }
    println!("Signed out");

    Ok(())
}

/// Prompts the `User` for a single line of input.
pub(crate) fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    _ = io::stdin().read_line(&mut line)?;

    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
