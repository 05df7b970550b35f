pub mod client;
pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "expert")]
#[command(about = "Expert CLI - Command-line client for the Expert Todo API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Target server selection and health")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },

    #[command(about = "Authentication and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Create, list and show todos")]
    Todo {
        #[command(subcommand)]
        cmd: commands::todo::TodoCommands,
    },

    #[command(about = "Comments on a todo")]
    Comment {
        #[command(subcommand)]
        cmd: commands::comment::CommentCommands,
    },

    #[command(about = "Managers of a todo")]
    Manager {
        #[command(subcommand)]
        cmd: commands::manager::ManagerCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Server { cmd } => commands::server::handle(cmd, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Todo { cmd } => commands::todo::handle(cmd, output_format).await,
        Commands::Comment { cmd } => commands::comment::handle(cmd, output_format).await,
        Commands::Manager { cmd } => commands::manager::handle(cmd, output_format).await,
    }
}
