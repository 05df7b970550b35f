use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::client::ApiClient;
use crate::cli::config::load_environment_config;
use crate::cli::utils::{field, output_records, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ManagerCommands {
    #[command(about = "List managers of a todo")]
    List {
        #[arg(help = "Todo id")]
        todo: Uuid,
    },

    #[command(about = "Add a manager to a todo you own")]
    Add {
        #[arg(help = "Todo id")]
        todo: Uuid,
        #[arg(help = "User id of the new manager")]
        user: Uuid,
    },

    #[command(about = "Remove a manager from a todo you own")]
    Remove {
        #[arg(help = "Todo id")]
        todo: Uuid,
        #[arg(help = "Manager id (not the user id)")]
        manager: Uuid,
    },
}

pub async fn handle(cmd: ManagerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let env = load_environment_config()?;
    let client = ApiClient::authenticated(&env)?;
    let render = |manager: &serde_json::Value| {
        format!("{}  {} ({})", field(manager, "id"), field(manager, "nickname"), field(manager, "user_id"))
    };

    match cmd {
        ManagerCommands::List { todo } => {
            let data = client.get(&format!("/todos/{}/managers", todo)).await?;
            output_records(output_format, &data, "No managers", render)
        }
        ManagerCommands::Add { todo, user } => {
            let data = client
                .post(&format!("/todos/{}/managers", todo), &json!({ "user_id": user }))
                .await?;
            output_records(output_format, &data, "", render)
        }
        ManagerCommands::Remove { todo, manager } => {
            client.delete(&format!("/todos/{}/managers/{}", todo, manager)).await?;
            output_success(output_format, &format!("Removed manager {}", manager), None)
        }
    }
}
