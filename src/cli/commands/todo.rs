use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::cli::client::ApiClient;
use crate::cli::config::load_environment_config;
use crate::cli::utils::{field, output_records, render_todo};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum TodoCommands {
    #[command(about = "List todos, newest first; every filter is optional")]
    List {
        #[arg(long, help = "Only todos with this weather")]
        weather: Option<String>,
        #[arg(long, help = "Modified at or after (RFC 3339)")]
        start: Option<String>,
        #[arg(long, help = "Modified at or before (RFC 3339)")]
        end: Option<String>,
        #[arg(long, help = "Page number, starting at 1")]
        page: Option<i64>,
        #[arg(long, help = "Page size")]
        size: Option<i64>,
    },

    #[command(about = "Show one todo")]
    Get {
        #[arg(help = "Todo id")]
        id: Uuid,
    },

    #[command(about = "Create a todo owned by the signed-in user")]
    Create {
        #[arg(help = "Title")]
        title: String,
        #[arg(help = "Contents")]
        contents: String,
    },
}

pub async fn handle(cmd: TodoCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let env = load_environment_config()?;
    let client = ApiClient::authenticated(&env)?;

    match cmd {
        TodoCommands::List { weather, start, end, page, size } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(weather) = weather {
                query.push(("weather", weather));
            }
            if let Some(start) = start {
                query.push(("start", start));
            }
            if let Some(end) = end {
                query.push(("end", end));
            }
            if let Some(page) = page {
                query.push(("page", page.to_string()));
            }
            if let Some(size) = size {
                query.push(("size", size.to_string()));
            }

            let data = client.get_query("/todos", &query).await?;
            match output_format {
                OutputFormat::Json => output_records(output_format, &data, "", render_todo),
                OutputFormat::Text => {
                    output_records(output_format, &data["content"], "No todos found", render_todo)?;
                    println!(
                        "page {} of {} ({} total)",
                        field(&data, "page"),
                        field(&data, "total_pages"),
                        field(&data, "total_elements")
                    );
                    Ok(())
                }
            }
        }
        TodoCommands::Get { id } => {
            let data = client.get(&format!("/todos/{}", id)).await?;
            output_records(output_format, &data, "", |todo| {
                format!("{}\n\n{}\n\nmodified {}", render_todo(todo), field(todo, "contents"), field(todo, "modified_at"))
            })
        }
        TodoCommands::Create { title, contents } => {
            let data = client
                .post("/todos", &json!({ "title": title, "contents": contents }))
                .await?;
            output_records(output_format, &data, "", |todo| format!("Created {}", render_todo(todo)))
        }
    }
}
