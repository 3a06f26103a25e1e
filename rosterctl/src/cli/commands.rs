//! One-shot commands sharing the console's stores.

use anyhow::{Result, anyhow, bail};
use roster_core::domains::auth::update::LOGOUT_SUCCESS_TOAST;
use roster_core::domains::navigation::{AccessState, Route, guard};
use roster_core::domains::ui::confirm::{DELETE_MESSAGE, DELETE_TITLE};
use roster_core::domains::ui::form::{LoginForm, UserForm};
use roster_core::domains::users::update::{
    CREATED_TOAST, DELETED_TOAST, SAVE_FAILED_TOAST, UPDATED_TOAST,
};
use roster_core::{SessionStore, UserCollectionStore, ValidationError, filter_users};
use roster_model::UserId;
use tracing::info;

use super::Context;
use super::output::{self, ListLayout};

/// Optional user form values from the command line.
#[derive(Debug, Default)]
pub struct UserFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl UserFields {
    fn apply(self, form: &mut UserForm) {
        if let Some(v) = self.first_name {
            form.first_name = v;
        }
        if let Some(v) = self.last_name {
            form.last_name = v;
        }
        if let Some(v) = self.email {
            form.email = v;
        }
        if let Some(v) = self.avatar {
            form.avatar = v;
        }
    }
}

fn invalid(errors: ValidationError) -> anyhow::Error {
    let lines: Vec<String> = errors
        .errors
        .iter()
        .map(|(field, message)| format!("  {}: {message}", field.label()))
        .collect();
    anyhow!("invalid input:\n{}", lines.join("\n"))
}

/// The same guard the console applies before showing the users page.
fn require_session(ctx: &Context) -> Result<SessionStore> {
    let session = ctx.session();
    let access = if session.is_authenticated() {
        AccessState::Authenticated
    } else {
        AccessState::Unauthenticated
    };
    if guard(Route::Users, access) == Route::Login {
        bail!("not logged in; run `rosterctl login` first");
    }
    Ok(session)
}

pub async fn login(ctx: &Context, email: String, password: String) -> Result<()> {
    let request = LoginForm { email, password }.validate().map_err(invalid)?;
    let mut session = ctx.session();
    session
        .login(ctx.services.auth.as_ref(), &request.email, &request.password)
        .await
        .map_err(|message| anyhow!("login failed: {message}"))?;
    println!("Logged in to {} as {}", ctx.config.api_host(), request.email);
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    let mut session = ctx.session();
    if !session.is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }
    match session.logout(ctx.services.auth.as_ref()).await {
        Ok(()) => {
            println!("{LOGOUT_SUCCESS_TOAST}");
            Ok(())
        }
        Err(message) => {
            bail!("logout request failed ({message}); the local session was cleared anyway")
        }
    }
}

pub fn status(ctx: &Context) -> Result<()> {
    let session = ctx.session();
    println!("API:          {}", ctx.config.base_url);
    println!("Session file: {}", ctx.session_path.display());
    println!(
        "Logged in:    {}",
        if session.is_authenticated() { "yes" } else { "no" }
    );
    Ok(())
}

pub async fn list_users(
    ctx: &Context,
    page: u32,
    search: Option<&str>,
    layout: ListLayout,
) -> Result<()> {
    require_session(ctx)?;
    let mut store = UserCollectionStore::new(ctx.policy);
    store
        .fetch(ctx.services.users.as_ref(), page)
        .await
        .map_err(|message| anyhow!(message))?;

    let visible = filter_users(store.users(), search.unwrap_or_default());
    let mut stdout = std::io::stdout().lock();
    output::write_users(&mut stdout, &visible, layout)?;
    output::write_pagination(&mut stdout, &store)?;
    Ok(())
}

pub async fn create_user(ctx: &Context, fields: UserFields) -> Result<()> {
    require_session(ctx)?;
    let mut form = UserForm::default();
    fields.apply(&mut form);
    let request = form.register_request(&mut rand::rng()).map_err(invalid)?;

    let mut store = UserCollectionStore::new(ctx.policy);
    store
        .create(ctx.services.users.as_ref(), &request)
        .await
        .map_err(|message| anyhow!("{SAVE_FAILED_TOAST} {message}"))?;
    info!(email = %request.email, "user created");
    println!("{CREATED_TOAST}");
    Ok(())
}

pub async fn update_user(
    ctx: &Context,
    user_id: UserId,
    page: u32,
    fields: UserFields,
) -> Result<()> {
    require_session(ctx)?;
    let mut store = UserCollectionStore::new(ctx.policy);
    store
        .fetch(ctx.services.users.as_ref(), page)
        .await
        .map_err(|message| anyhow!(message))?;

    // Prefill from the listed record so partial updates keep other fields.
    let mut form = store.user(user_id).map(UserForm::from_user).unwrap_or_default();
    fields.apply(&mut form);
    let request = form.update_request().map_err(invalid)?;

    store
        .update(ctx.services.users.as_ref(), user_id, &request)
        .await
        .map_err(|message| anyhow!("{SAVE_FAILED_TOAST} {message}"))?;
    println!("{UPDATED_TOAST}");
    Ok(())
}

pub async fn delete_user(ctx: &Context, user_id: UserId, confirmed: bool) -> Result<()> {
    require_session(ctx)?;
    if !confirmed {
        bail!("{DELETE_TITLE}: {DELETE_MESSAGE}\nRe-run with --yes to confirm.");
    }
    let mut store = UserCollectionStore::new(ctx.policy);
    store
        .delete(ctx.services.users.as_ref(), user_id)
        .await
        .map_err(|message| anyhow!("Failed to delete user. {message}"))?;
    println!("{DELETED_TOAST}");
    Ok(())
}
