/// chef-users - manage users on a Chef server
mod commands;
mod config;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chef-users")]
#[command(about = "Manage users on a Chef server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./chef.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Chef server API root, overrides the configured URL
    #[arg(short, long, global = true, env = "CHEF_SERVER_URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all users
    List,
    /// Show a single user
    Get {
        /// User name
        name: String,
    },
    /// Create a new user
    Create(UserFields),
    /// Replace an existing user record; fields not given are cleared on the server
    Update(UserFields),
    /// Delete a user
    Delete {
        /// User name
        name: String,
    },
    /// Check a user's password
    Authenticate {
        /// User name
        name: String,
        /// Password to verify
        #[arg(short, long, env = "CHEF_USER_PASSWORD")]
        password: String,
    },
}

/// Fields of a user record
#[derive(Args, Debug, Default)]
pub struct UserFields {
    /// User name
    pub name: String,
    #[arg(long)]
    pub display_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub middle_name: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    /// Path to a PEM public key file
    #[arg(long)]
    pub public_key: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chef_users=info,chef_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = config::CliConfig::load(cli.config.as_deref())?;
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    config.validate()?;

    tracing::debug!(server = %config.server_url, "Using Chef server");
    let client = chef_api::ChefClient::new(config.to_chef_config())?;

    match cli.command {
        Commands::List => commands::list(&client).await?,
        Commands::Get { name } => commands::get(&client, &name).await?,
        Commands::Create(fields) => commands::create(&client, fields).await?,
        Commands::Update(fields) => commands::update(&client, fields).await?,
        Commands::Delete { name } => commands::delete(&client, &name).await?,
        Commands::Authenticate { name, password } => {
            commands::authenticate(&client, &name, &password).await?;
        }
    }

    Ok(())
}
