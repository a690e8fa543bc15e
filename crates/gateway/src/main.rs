//! Directory server - HTTP API for users and purchases.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use directory_service_lib::service::{Directory, DirectoryService};
use directory_service_lib::store::JsonFileStore;
use gateway_lib::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "directory")]
#[command(about = "User directory and purchase log server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// User document (overrides USERS_FILE)
        #[arg(long)]
        users_file: Option<PathBuf>,
        /// Purchase log (overrides PURCHASES_FILE)
        #[arg(long)]
        purchases_file: Option<PathBuf>,
    },
    /// User maintenance commands
    Users {
        #[command(subcommand)]
        action: UserCommands,
        /// User document (overrides USERS_FILE)
        #[arg(long, global = true)]
        users_file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Print all users as JSON
    List,
    /// Remove every user
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = GatewayConfig::from_env();

    match cli.command {
        Commands::Serve {
            host,
            port,
            users_file,
            purchases_file,
        } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(path) = users_file {
                config.directory.users_file = path;
            }
            if let Some(path) = purchases_file {
                config.directory.purchases_file = path;
            }
            gateway_lib::run_server(config).await?;
        }
        Commands::Users { action, users_file } => {
            let path = users_file.unwrap_or(config.directory.users_file);
            let store = JsonFileStore::open(path).await?;
            let directory = Directory::new(std::sync::Arc::new(store));

            match action {
                UserCommands::List => {
                    let users = directory.list_users().await?;
                    println!("{}", serde_json::to_string_pretty(&users)?);
                }
                UserCommands::Clear => {
                    directory.clear_all().await?;
                    println!("All users removed");
                }
            }
        }
    }

    Ok(())
}
