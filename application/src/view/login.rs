//! Login view.

use secrecy::SecretBox;
use service::{
    access::Decision, command::CreateSession, domain::user, Command as _,
};

use crate::{view::dashboard, Context};

/// Opens the login view: prompts for `User` credentials and, on success,
/// renders the dashboard.
///
/// A rejection is always rendered as the same generic message, regardless of
/// whether the username or the password was wrong.
///
/// # Errors
///
/// Errors if the terminal cannot be read from or written to.
pub async fn open(ctx: &Context) -> Result<(), ()> {
    let username = super::prompt("Username: ").map_err(|e| {
        tracing::error!("failed to read input: {e}");
    })?;
    let password = super::prompt("Password: ").map_err(|e| {
        tracing::error!("failed to read input: {e}");
    })?;

    let (Ok(username), Ok(password)) = (
        username.parse::<user::Username>(),
        password.parse::<user::Password>(),
    ) else {
        println!("Invalid credentials");
        return Ok(());
    };

    match ctx
        .service()
        .execute(CreateSession::ByCredentials {
            username,
            password: SecretBox::new(Box::new(password)),
        })
        .await
    {
        Ok(identity) => {
            println!("Signed in as {} ({})", identity.username, identity.role);

            match ctx.service().authorize(dashboard::REQUIRED_ROLES) {
                Decision::Allow => dashboard::render(ctx).await,
                Decision::RedirectToLogin => Ok(()),
            }
        }
        Err(e) => {
            if e.as_ref().is_rejection() {
                println!("Invalid credentials");
            } else {
                println!("Failed to sign in");
            }
            tracing::warn!("sign in failed: {e}");

            Ok(())
        }
    }
}
