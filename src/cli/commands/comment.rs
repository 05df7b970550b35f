use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::client::ApiClient;
use crate::cli::config::load_environment_config;
use crate::cli::utils::{field, output_records};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum CommentCommands {
    #[command(about = "List comments on a todo, oldest first")]
    List {
        #[arg(help = "Todo id")]
        todo: Uuid,
    },

    #[command(about = "Comment on a todo")]
    Add {
        #[arg(help = "Todo id")]
        todo: Uuid,
        #[arg(help = "Comment text")]
        contents: String,
    },
}

pub async fn handle(cmd: CommentCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let env = load_environment_config()?;
    let client = ApiClient::authenticated(&env)?;
    let render = |comment: &serde_json::Value| format!("{}: {}", field(comment, "nickname"), field(comment, "contents"));

    match cmd {
        CommentCommands::List { todo } => {
            let data = client.get(&format!("/todos/{}/comments", todo)).await?;
            output_records(output_format, &data, "No comments", render)
        }
        CommentCommands::Add { todo, contents } => {
            let data = client
                .post(&format!("/todos/{}/comments", todo), &json!({ "contents": contents }))
                .await?;
            output_records(output_format, &data, "", render)
        }
    }
}
