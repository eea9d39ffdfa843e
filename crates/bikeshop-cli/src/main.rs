mod commands;
mod views;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::account::ProfileCommands;
use commands::admin::AdminCommands;
use commands::cart::CartCommands;
use commands::catalog::{AccessoryCommands, ProductCommands};
use commands::App;

#[derive(Debug, Parser)]
#[command(name = "bikeshop")]
#[command(about = "Bike shop storefront and admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse bikes
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Browse accessories
    Accessories {
        #[command(subcommand)]
        command: AccessoryCommands,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// View and edit your cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Admin dashboard
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bikeshop_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(api = %config.api_base_url, env = %config.env, "starting");
    let app = App::new(config)?;
    app.spawn_loading_indicator();

    match cli.command {
        Commands::Products { command } => commands::catalog::run_products(&app, command).await?,
        Commands::Accessories { command } => {
            commands::catalog::run_accessories(&app, command).await?;
        }
        Commands::Login { email, password } => {
            commands::account::run_login(&app, &email, &password).await?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::account::run_register(&app, &name, &email, &password).await?,
        Commands::Logout => commands::account::run_logout(&app),
        Commands::Whoami => commands::account::run_whoami(&app).await?,
        Commands::Profile { command } => commands::account::run_profile(&app, command).await?,
        Commands::Cart { command } => commands::cart::run_cart(&app, command).await?,
        Commands::Admin { command } => commands::admin::run_admin(&app, command).await?,
    }

    Ok(())
}
