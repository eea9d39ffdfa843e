use clap::Subcommand;

use bikeshop_client::ProfileUpdate;

use super::App;
use crate::views;

/// Sub-commands available under `profile`.
#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Change name, email, or password of the signed-in user
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

pub(crate) async fn run_login(app: &App, email: &str, password: &str) -> anyhow::Result<()> {
    let user = app.session().login(email, password).await?;
    println!("{}", views::success(&format!("Welcome back, {}", user.name)));
    Ok(())
}

pub(crate) async fn run_register(
    app: &App,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let user = app.session().register(name, email, password).await?;
    println!("{}", views::success(&format!("Account created for {}", user.email)));
    Ok(())
}

pub(crate) fn run_logout(app: &App) {
    app.session().logout();
    println!("{}", views::success("Logged out"));
}

pub(crate) async fn run_whoami(app: &App) -> anyhow::Result<()> {
    let Some(user) = app.session().restore().await else {
        println!("Not logged in");
        return Ok(());
    };
    println!("{:<10}{}", "NAME", user.name);
    println!("{:<10}{}", "EMAIL", user.email);
    println!("{:<10}{}", "ROLE", user.role);
    if let Some(created) = user.created_at {
        println!("{:<10}{}", "SINCE", created.format("%Y-%m-%d"));
    }
    Ok(())
}

pub(crate) async fn run_profile(app: &App, command: ProfileCommands) -> anyhow::Result<()> {
    match command {
        ProfileCommands::Update {
            name,
            email,
            password,
        } => {
            let session = app.session();
            if session.restore().await.is_none() {
                anyhow::bail!("Please login to update your profile");
            }
            let update = ProfileUpdate {
                name,
                email,
                password,
            };
            let user = session.update_profile(&update).await?;
            println!("{}", views::success(&format!("Profile updated for {}", user.email)));
        }
    }
    Ok(())
}
