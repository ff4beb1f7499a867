//! login, logout and status

use crate::cli::{OutputFormat, ProviderArg};
use anyhow::{bail, Context};
use comfy_table::{presets::UTF8_FULL, Table};
use std::path::PathBuf;
use std::sync::Arc;
use taskboard::session::{FileUserStore, SessionState, SessionStore};
use taskboard::{TaskboardConfig, User};

/// Where the signed-in user is kept: the configured file, else the data dir
pub fn user_file(config: &TaskboardConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = &config.session.user_file {
        return Ok(path.clone());
    }
    let data_dir = dirs::data_dir().context("no data directory for this platform")?;
    Ok(data_dir.join("taskboard").join("user.json"))
}

/// A session store over the persisted user record, with any record restored
pub async fn open(config: &TaskboardConfig) -> anyhow::Result<SessionStore> {
    let path = user_file(config)?;
    tracing::debug!(path = %path.display(), "opening session");
    let store = SessionStore::mock(&config.session, Arc::new(FileUserStore::new(path)));
    store.restore_session().await;
    Ok(store)
}

pub async fn login(
    config: &TaskboardConfig,
    email: Option<String>,
    password: Option<String>,
    provider: Option<ProviderArg>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let session = open(config).await?;

    let user = match (email, provider) {
        (Some(email), None) => {
            let password = password.unwrap_or_default();
            session.login(&email, &password).await?
        }
        (None, Some(provider)) => session.login_with_provider(provider.into()).await?,
        _ => bail!("pass either --email and --password, or --provider"),
    };

    print_user(&user, format)
}

pub async fn logout(config: &TaskboardConfig) -> anyhow::Result<()> {
    let session = open(config).await?;
    let Some(user) = session.current_user() else {
        println!("Not signed in");
        return Ok(());
    };

    session.logout().await?;
    println!("Signed out {}", user.display_name());
    Ok(())
}

pub async fn status(config: &TaskboardConfig, format: OutputFormat) -> anyhow::Result<()> {
    let session = open(config).await?;
    let state = session.state();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state)?),
        OutputFormat::Table => match &state {
            SessionState::Authenticated { user } => print_user(user, format)?,
            _ => println!("{}", describe(&state)),
        },
    }
    Ok(())
}

fn describe(state: &SessionState) -> String {
    match state {
        SessionState::Unauthenticated => "Not signed in".to_string(),
        SessionState::Authenticating => "Signing in...".to_string(),
        SessionState::Authenticated { user } => format!("Signed in as {}", user.display_name()),
        SessionState::Error { message } => format!("Error: {message}"),
    }
}

fn print_user(user: &User, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(user)?),
        OutputFormat::Table => println!("{}", user_table(user)),
    }
    Ok(())
}

fn user_table(user: &User) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Id".to_string(), user.id.to_string()]);
    table.add_row(vec!["Email".to_string(), user.email.clone()]);
    table.add_row(vec!["Name".to_string(), user.display_name().to_string()]);
    if let Some(provider) = user.provider {
        table.add_row(vec!["Provider".to_string(), provider.to_string()]);
    }
    if let Some(avatar) = &user.avatar {
        table.add_row(vec!["Avatar".to_string(), avatar.clone()]);
    }
    table
}
