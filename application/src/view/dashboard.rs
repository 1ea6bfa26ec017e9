//! Dashboard view.

use secrecy::SecretBox;
use service::{
    command::{CreateUser, DeleteUser, UpdateUser},
    domain::user::{self, NewUser, Role, UserPatch},
    query, Command as _, Query as _,
};

use crate::Context;

/// [`Role`]s allowed to open the dashboard at all.
pub const REQUIRED_ROLES: &[Role] =
    &[Role::Admin, Role::Manager, Role::Employee];

/// [`Role`]s allowed to see the `User` list.
const LISTING_ROLES: &[Role] = &[Role::Admin, Role::Manager];

/// [`Role`]s allowed to manage `User`s.
///
/// A client-side convenience only: the remote service re-checks every
/// management operation on its own.
pub const MANAGEMENT_ROLES: &[Role] = &[Role::Admin];

/// Renders the dashboard of the current `User`.
///
/// Managers and administrators see the `User` list, everyone else sees the
/// own profile. A remote rejection renders an inline error line and leaves
/// the current session intact.
///
/// # Errors
///
/// Never errors: every failure is rendered inline.
pub async fn render(ctx: &Context) -> Result<(), ()> {
    use service::access::Decision;

    let service = ctx.service();
    let Some(identity) = service.current_identity() else {
        return Ok(());
    };

    println!("Dashboard of {} ({})", identity.username, identity.role);

    if let Decision::Allow = service.authorize(LISTING_ROLES) {
        match service.execute(query::user::List).await {
            Ok(users) => {
                println!("{:<6} {:<24} {}", "ID", "USERNAME", "ROLE");
                for u in users {
                    println!("{:<6} {:<24} {}", u.id, u.username, u.role);
                }
            }
            Err(e) => {
                println!("Failed to load users");
                tracing::warn!("failed to load the `User` list: {e}");
            }
        }
    } else {
        match service.execute(query::user::Profile).await {
            Ok(profile) => {
                println!("Profile: {} ({})", profile.username, profile.role);
                if let Some(email) = profile.email {
                    println!("Email: {email}");
                }
            }
            Err(e) => {
                println!("Failed to load profile");
                tracing::warn!("failed to load the own profile: {e}");
            }
        }
    }

    if let Decision::Allow = service.authorize(MANAGEMENT_ROLES) {
        println!(
            "Manage users with the `create-user`, `update-user` and \
             `delete-user` commands.",
        );
    }

    Ok(())
}

/// Registers a new `User`, prompting for its password.
///
/// The `User` list only reflects the change once the remote service has
/// acknowledged it.
///
/// # Errors
///
/// Errors if the terminal cannot be read from or written to.
pub async fn create_user(
    ctx: &Context,
    username: user::Username,
    role: Role,
) -> Result<(), ()> {
    let password = super::prompt("Password: ").map_err(|e| {
        tracing::error!("failed to read input: {e}");
    })?;
    let Ok(password) = password.parse::<user::Password>() else {
        println!("Failed to create user");
        return Ok(());
    };

    match ctx
        .service()
        .execute(CreateUser(NewUser {
            username,
            password: SecretBox::new(Box::new(password)),
            role,
        }))
        .await
    {
        Ok(record) => {
            println!(
                "Created user {} ({}) with ID {}",
                record.username, record.role, record.id,
            );
        }
        Err(e) => {
            println!("Failed to create user");
            tracing::warn!("failed to create a `User`: {e}");
        }
    }

    Ok(())
}

/// Updates an existing `User`.
///
/// # Errors
///
/// Never errors: every failure is rendered inline.
pub async fn update_user(
    ctx: &Context,
    id: user::Id,
    username: user::Username,
    role: Role,
) -> Result<(), ()> {
    match ctx
        .service()
        .execute(UpdateUser(UserPatch { id, username, role }))
        .await
    {
        Ok(()) => println!("Updated user {id}"),
        Err(e) => {
            println!("Failed to update user");
            tracing::warn!("failed to update `User(id: {id})`: {e}");
        }
    }

    Ok(())
}

/// Deletes an existing `User`.
///
/// # Errors
///
/// Never errors: every failure is rendered inline.
pub async fn delete_user(ctx: &Context, id: user::Id) -> Result<(), ()> {
    match ctx.service().execute(DeleteUser(id)).await {
        Ok(()) => println!("Deleted user {id}"),
        Err(e) => {
            println!("Failed to delete user");
            tracing::warn!("failed to delete `User(id: {id})`: {e}");
        }
    }

    Ok(())
}
